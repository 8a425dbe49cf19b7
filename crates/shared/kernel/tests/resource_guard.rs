use folio_kernel::safe_nanoid;
use folio_kernel::security::resource::ResourceGuard;

#[test]
fn resource_guard_accepts_bare_and_qualified_ids() {
    let id = safe_nanoid!();

    assert_eq!(ResourceGuard::verify(&id, "inquiry").unwrap(), id);
    assert_eq!(ResourceGuard::verify(format!("inquiry:{id}"), "inquiry").unwrap(), id);
}

#[test]
fn resource_guard_rejects_malformed_ids() {
    assert!(ResourceGuard::verify("system:config", "inquiry").is_err());
    assert!(ResourceGuard::verify("", "inquiry").is_err());
    assert!(ResourceGuard::verify("inquiry:", "inquiry").is_err());
    assert!(ResourceGuard::verify("abc;DELETE", "inquiry").is_err());
    // `0`, `O`, `1`, `l` and `I` are outside the ID alphabet.
    assert!(ResourceGuard::verify("O0l1I", "inquiry").is_err());
    assert!(ResourceGuard::verify("a".repeat(65), "inquiry").is_err());
}
