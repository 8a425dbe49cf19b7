use folio_domain::constants::{CONTACT_TAG, ENV_PREFIX, HOSTING_PORT_VAR, INQUIRY, SYSTEM_TAG};

#[test]
fn constants_match_expected_strings() {
    assert_eq!(ENV_PREFIX, "FOLIO");
    assert_eq!(HOSTING_PORT_VAR, "PORT");
    assert_eq!(INQUIRY, "inquiry");
    assert_eq!(SYSTEM_TAG, "System");
    assert_eq!(CONTACT_TAG, "Contact");
}
