use folio::domain::config::ApiConfig;
use folio::features::contact::Contact;
use folio::kernel::server::ApiState;

#[tokio::test]
async fn slices_register_against_in_memory_database() {
    let config = ApiConfig::default();
    let database = folio::server::database(None).init().await.unwrap();
    assert!(database.is_ephemeral());

    let slices = folio::init(&config, &database).unwrap();
    let state = ApiState::builder()
        .config(config)
        .db(database)
        .register_slices(slices)
        .build()
        .unwrap();

    assert!(state.get_slice::<Contact>().is_some());
    assert!(folio::features::is_enabled("contact"));
    assert!(folio::features::is_enabled("server"));
}
