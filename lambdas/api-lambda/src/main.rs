use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{run, service_fn, tracing, Error, Request};
use rapidclean_shared::config::Config;
use rapidclean_shared::store::DynamoStore;
use rapidclean_shared::AppState;
use std::sync::Arc;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // Initialize the AWS client and configuration once at startup
    let aws_config = aws_config::load_from_env().await;
    let store = Arc::new(DynamoStore::new(DynamoClient::new(&aws_config)));
    let state = AppState::new(store, Config::from_env());

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
