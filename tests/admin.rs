mod common;

use std::collections::BTreeMap;

use krishimitra::{
    dto::admin::FarmerQuery,
    entity::users,
    models::Role,
    services::admin_service::{self, like_pattern},
};
use sea_orm::{DatabaseBackend, MockDatabase, Value};

#[test]
fn search_wildcards_are_matched_literally() {
    assert_eq!(like_pattern("ravi"), "%ravi%");
    assert_eq!(like_pattern("_"), r"%\_%");
    assert_eq!(like_pattern("100%"), r"%100\%%");
    assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
}

#[tokio::test]
async fn farmer_search_sends_the_escaped_pattern() -> anyhow::Result<()> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([("num_items", Value::BigInt(Some(0)))])]])
        .append_query_results([Vec::<users::Model>::new()])
        .into_connection();
    let state = common::state_with(db);
    let admin = common::caller(Role::Admin);

    let list = admin_service::list_farmers(
        &state,
        &admin,
        FarmerQuery {
            page: None,
            per_page: None,
            q: Some(" _ ".into()),
            status: None,
        },
    )
    .await?;
    assert!(list.data.expect("farmers").items.is_empty());

    let log = common::transaction_log(state);
    let count = format!("{:?}", log[0]);
    assert!(count.contains("ILIKE") && count.contains(r"%\\_%"), "{count}");
    Ok(())
}
