//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    account::{create_account_endpoint, delete_account_endpoint, get_accounts_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, get_create_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::ACCOUNTS_VIEW, get(get_accounts_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::ACCOUNTS_API,
            post(create_account_endpoint).delete(delete_account_endpoint),
        )
        .route(endpoints::TRANSACTIONS_API, post(create_transaction_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the accounts page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::ACCOUNTS_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rust_decimal_macros::dec;

    use crate::{AppState, build_router, endpoints};

    fn test_server() -> (TestServer, AppState) {
        let state = AppState::new("Etc/UTC");
        let server = TestServer::new(build_router(state.clone()));

        (server, state)
    }

    #[tokio::test]
    async fn pages_are_served() {
        let (server, _) = test_server();

        for page in [
            endpoints::ACCOUNTS_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::NEW_TRANSACTION_VIEW,
        ] {
            server.get(page).await.assert_status_ok();
        }

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        server
            .get("/does-not-exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn accounts_and_transactions_end_to_end() {
        let (server, state) = test_server();

        server
            .post(endpoints::ACCOUNTS_API)
            .form(&[("name", "Checking"), ("balance", "1000")])
            .await
            .assert_status(StatusCode::SEE_OTHER);
        server
            .post(endpoints::ACCOUNTS_API)
            .form(&[("name", "Savings"), ("balance", "5000")])
            .await
            .assert_status(StatusCode::SEE_OTHER);
        server
            .post(endpoints::ACCOUNTS_API)
            .form(&[("name", "Savings"), ("balance", "1")])
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("type_", "expense"),
                ("account", "Checking"),
                ("source", ""),
                ("destination", ""),
                ("amount", "25.00"),
                ("category", "Groceries"),
                ("date", "2024-03-01"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);
        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("type_", "transfer"),
                ("account", ""),
                ("source", "Savings"),
                ("destination", "Checking"),
                ("amount", "300"),
                ("category", ""),
                ("date", "2024-03-03"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        {
            let budget = state.budget.lock().unwrap();
            assert_eq!(budget.ledger().get("Checking").unwrap().balance, dec!(1275));
            assert_eq!(budget.ledger().get("Savings").unwrap().balance, dec!(4700));
            assert_eq!(budget.log().len(), 2);
        }

        let page = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_query_param("type", "Transfer")
            .await;
        page.assert_status_ok();
        page.assert_text_contains("Savings -&gt; Checking");

        let page = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_query_param("category", "")
            .await;
        page.assert_status_ok();
        page.assert_text_contains("Showing 1 of 2");

        server
            .delete(endpoints::ACCOUNTS_API)
            .add_query_param("name", "Savings")
            .await
            .assert_status_ok();
        server
            .delete(endpoints::ACCOUNTS_API)
            .add_query_param("name", "Savings")
            .await
            .assert_status_ok();

        let budget = state.budget.lock().unwrap();
        assert_eq!(budget.ledger().len(), 1);
        assert_eq!(budget.log().len(), 2);
    }
}
