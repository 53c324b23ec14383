mod common;

use axum::http::{Method, StatusCode};
use common::{amount, spawn_app, TestApp};
use serde_json::{json, Value};

async fn create_account(app: &TestApp, token: &str, name: &str, kind: &str, balance: f64) -> Value {
    let (status, body) = app
        .post(
            "/api/accounts",
            token,
            json!({ "name": name, "accountType": kind, "balance": balance }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn create_card(app: &TestApp, token: &str) -> Value {
    let (status, body) = app
        .post(
            "/api/credit-cards",
            token,
            json!({ "name": "Visa", "creditLimit": 5000, "closingDay": 5, "dueDay": 15 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn create_category(app: &TestApp, token: &str, group: &str) -> Value {
    let (status, body) = app
        .post(
            "/api/categories",
            token,
            json!({ "name": format!("Cat {group}"), "kind": "expense", "budgetGroup": group }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

fn id(value: &Value) -> &str {
    value["id"].as_str().unwrap()
}

#[tokio::test]
async fn confirmed_expense_moves_the_account_balance() {
    let app = spawn_app().await;
    let token = app.login_as("ana@example.com").await;
    let account = create_account(&app, &token, "Checking", "checking", 1000.0).await;

    let (status, tx) = app
        .post(
            "/api/transactions",
            &token,
            json!({
                "accountId": id(&account),
                "kind": "expense",
                "amount": 120.5,
                "description": "Groceries",
                "date": "2025-03-02"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{tx}");
    assert_eq!(tx["status"], "confirmed");
    assert_eq!(tx["accountId"], id(&account));
    assert!(tx["creditCardId"].is_null());

    let (_, accounts) = app.get("/api/accounts", &token).await;
    assert_eq!(amount(&accounts[0]["balance"]), 879.5);

    let (status, listed) = app
        .get("/api/transactions?month=3&year=2025", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = app
        .delete(&format!("/api/transactions/{}", id(&tx)), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, accounts) = app.get("/api/accounts", &token).await;
    assert_eq!(amount(&accounts[0]["balance"]), 1000.0);
}

#[tokio::test]
async fn transactions_need_exactly_one_target() {
    let app = spawn_app().await;
    let token = app.login_as("ana@example.com").await;
    let account = create_account(&app, &token, "Checking", "checking", 10.0).await;
    let card = create_card(&app, &token).await;

    let (status, _) = app
        .post(
            "/api/transactions",
            &token,
            json!({
                "accountId": id(&account),
                "creditCardId": id(&card),
                "kind": "expense",
                "amount": 1,
                "description": "Both",
                "date": "2025-03-02"
            }),
        )
        .await;
    assert!(status.is_client_error());

    let (_, accounts) = app.get("/api/accounts", &token).await;
    assert_eq!(amount(&accounts[0]["balance"]), 10.0);
}

#[tokio::test]
async fn users_cannot_see_each_others_data() {
    let app = spawn_app().await;
    let ana = app.login_as("ana@example.com").await;
    let bruno = app.login_as("bruno@example.com").await;
    let account = create_account(&app, &ana, "Checking", "checking", 50.0).await;

    let (_, listed) = app.get("/api/accounts", &bruno).await;
    assert_eq!(listed, json!([]));

    let (status, _) = app
        .put(
            &format!("/api/accounts/{}", id(&account)),
            &bruno,
            json!({ "name": "Stolen", "accountType": "checking", "isActive": true }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .delete(&format!("/api/accounts/{}", id(&account)), &bruno)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn installment_purchase_on_a_card() {
    let app = spawn_app().await;
    let token = app.login_as("ana@example.com").await;
    let card = create_card(&app, &token).await;
    let category = create_category(&app, &token, "wants").await;

    let (status, created) = app
        .post(
            "/api/recurrences",
            &token,
            json!({
                "creditCardId": id(&card),
                "categoryId": id(&category),
                "kind": "expense",
                "amount": 300,
                "description": "Sofa",
                "frequency": "monthly",
                "startDate": "2025-01-31",
                "installments": 3
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(amount(&created["totalValue"]), 900.0);
    let transactions = created["transactions"].as_array().unwrap();
    let dates: Vec<&str> = transactions
        .iter()
        .map(|t| t["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-01-31", "2025-02-28", "2025-03-31"]);
    assert_eq!(transactions[1]["description"], "Sofa (2/3 parcela)");
    assert!(transactions.iter().all(|t| t["status"] == "pending"));

    let first = id(&transactions[0]).to_string();
    let confirm_uri = format!("/api/transactions/{first}/confirm");
    let (status, confirmed) = app.send(Method::PUT, &confirm_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{confirmed}");
    assert_eq!(confirmed["transaction"]["status"], "confirmed");
    assert!(confirmed["nextTransaction"].is_null());

    let (status, body) = app.send(Method::PUT, &confirm_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let (_, cards) = app.get("/api/credit-cards", &token).await;
    assert_eq!(amount(&cards[0]["usedAmount"]), 300.0);

    let recurrence_id = created["recurrence"]["id"].as_str().unwrap();
    let (status, details) = app
        .get(&format!("/api/recurrences/{recurrence_id}/details"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["pendingCount"], 2);
    assert_eq!(details["confirmedCount"], 1);
    assert_eq!(amount(&details["remainingValue"]), 600.0);

    let (status, pending) = app.get("/api/transactions/pending", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn forever_recurrence_rolls_forward_and_cascades_on_delete() {
    let app = spawn_app().await;
    let token = app.login_as("ana@example.com").await;
    let account = create_account(&app, &token, "Checking", "checking", 5000.0).await;
    let category = create_category(&app, &token, "necessities").await;

    let (status, created) = app
        .post(
            "/api/recurrences",
            &token,
            json!({
                "accountId": id(&account),
                "categoryId": id(&category),
                "kind": "expense",
                "amount": 1500,
                "description": "Rent",
                "frequency": "monthly",
                "startDate": "2025-01-10"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["transactions"].as_array().unwrap().len(), 1);
    let first = id(&created["transactions"][0]).to_string();

    let (status, confirmed) = app
        .put(
            &format!("/api/transactions/{first}/confirm"),
            &token,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{confirmed}");
    assert_eq!(confirmed["nextTransaction"]["date"], "2025-02-10");
    assert_eq!(confirmed["nextTransaction"]["status"], "pending");

    let recurrence_id = created["recurrence"]["id"].as_str().unwrap();
    let (status, updated) = app
        .put(
            &format!("/api/recurrences/{recurrence_id}"),
            &token,
            json!({ "amount": 1600 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    let touched = updated["updatedTransactions"].as_array().unwrap();
    assert_eq!(touched.len(), 1);
    assert_eq!(amount(&touched[0]["amount"]), 1600.0);

    let (status, _) = app
        .delete(&format!("/api/categories/{}", id(&category)), &token)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, deleted) = app
        .delete(&format!("/api/recurrences/{recurrence_id}"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deletedTransactions"], 2);

    let (_, active) = app.get("/api/recurrences", &token).await;
    assert_eq!(active, json!([]));
    let (status, _) = app
        .delete(&format!("/api/categories/{}", id(&category)), &token)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn transfers_and_card_payments() {
    let app = spawn_app().await;
    let token = app.login_as("ana@example.com").await;
    let checking = create_account(&app, &token, "Checking", "checking", 1000.0).await;
    let savings = create_account(&app, &token, "Savings", "savings", 0.0).await;
    let card = create_card(&app, &token).await;

    let (status, result) = app
        .post(
            "/api/accounts/transfer",
            &token,
            json!({ "fromAccountId": id(&checking), "toAccountId": id(&savings), "amount": 400 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{result}");
    assert_eq!(amount(&result["fromAccount"]["balance"]), 600.0);
    assert_eq!(amount(&result["toAccount"]["balance"]), 400.0);

    let (status, _) = app
        .post(
            "/api/accounts/transfer",
            &token,
            json!({ "fromAccountId": id(&checking), "toAccountId": id(&savings), "amount": 10000 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    app.post(
        "/api/transactions",
        &token,
        json!({
            "creditCardId": id(&card),
            "kind": "expense",
            "amount": 250,
            "description": "Shoes",
            "date": "2025-03-03"
        }),
    )
    .await;

    let (status, paid) = app
        .post(
            &format!("/api/credit-cards/{}/payment", id(&card)),
            &token,
            json!({ "accountId": id(&checking), "amount": 300 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{paid}");
    assert_eq!(amount(&paid["card"]["usedAmount"]), 0.0);
    assert_eq!(amount(&paid["account"]["balance"]), 300.0);

    let (status, summary) = app.get("/api/dashboard/3/2025", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&summary["totalExpenses"]), 250.0);
    assert_eq!(amount(&summary["totalBalance"]), 700.0);

    // Removing the payment and transfer records moves the money back.
    let mut records: Vec<Value> = paid["transactions"].as_array().unwrap().clone();
    records.extend(result["transactions"].as_array().unwrap().iter().cloned());
    for record in &records {
        let (status, _) = app
            .delete(&format!("/api/transactions/{}", id(record)), &token)
            .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, accounts) = app.get("/api/accounts", &token).await;
    let balance_of = |name: &str| {
        accounts
            .as_array()
            .unwrap()
            .iter()
            .find(|a| a["name"] == name)
            .map(|a| amount(&a["balance"]))
            .unwrap()
    };
    assert_eq!(balance_of("Checking"), 1000.0);
    assert_eq!(balance_of("Savings"), 0.0);
    let (_, cards) = app.get("/api/credit-cards", &token).await;
    assert_eq!(amount(&cards[0]["usedAmount"]), 250.0);
}

#[tokio::test]
async fn budget_resolution_and_overview() {
    let app = spawn_app().await;
    let token = app.login_as("ana@example.com").await;

    let (status, none) = app.get("/api/budget/3/2025", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(none.is_null());

    let (status, stored) = app
        .post(
            "/api/budget",
            &token,
            json!({ "month": 3, "year": 2025, "totalIncome": 4000, "isDefault": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{stored}");
    assert_eq!(amount(&stored["necessitiesBudget"]), 2000.0);
    assert_eq!(amount(&stored["savingsBudget"]), 800.0);

    let (_, resolved) = app.get("/api/budget/3/2025", &token).await;
    assert_eq!(resolved["id"], stored["id"]);
    let (_, other_month) = app.get("/api/budget/4/2025", &token).await;
    assert!(other_month.is_null());

    let (status, overview) = app.get("/api/budget/3/2025/overview", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&overview["wants"]["budgeted"]), 1200.0);

    let (status, _) = app
        .post(
            "/api/budget",
            &token,
            json!({ "month": 13, "year": 2025, "totalIncome": 1, "isDefault": false }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn goals_crud() {
    let app = spawn_app().await;
    let token = app.login_as("ana@example.com").await;

    let (status, goal) = app
        .post(
            "/api/goals",
            &token,
            json!({ "title": "Trip", "targetAmount": 3000, "currentAmount": 500 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{goal}");
    assert_eq!(goal["isAchieved"], false);

    let (status, updated) = app
        .put(
            &format!("/api/goals/{}", id(&goal)),
            &token,
            json!({ "title": "Trip", "targetAmount": 3000, "currentAmount": 3000 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["isAchieved"], true);

    let (status, _) = app.delete(&format!("/api/goals/{}", id(&goal)), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, goals) = app.get("/api/goals", &token).await;
    assert_eq!(goals, json!([]));
}
