use kyte_api_client::KyteClient;
use kyte_api_client::auth::Credentials;

fn live_tests_enabled() -> bool {
    std::env::var("KYTE_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_session_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let credentials = match Credentials::try_from_env() {
        Some(creds) => creds,
        None => return Ok(()),
    };
    let (Ok(endpoint), Ok(username), Ok(password)) = (
        std::env::var("KYTE_ENDPOINT"),
        std::env::var("KYTE_USERNAME"),
        std::env::var("KYTE_PASSWORD"),
    ) else {
        return Ok(());
    };

    let client = KyteClient::builder(endpoint, credentials).build();
    let session = client.create_session(&username, &password).await?;
    assert!(session.get("sessionToken").is_some());

    let tokens = client.session_tokens();
    assert_ne!(tokens.session_token, "0");

    Ok(())
}
