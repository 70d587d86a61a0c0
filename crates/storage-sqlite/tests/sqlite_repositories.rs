use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use diesel::sql_types::Text;
use diesel::RunQueryDsl;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use fintrack_core::accounts::{Account, AccountRepositoryTrait, NewAccount};
use fintrack_core::cards::{CardBrand, CardRepositoryTrait, NewCardRecord};
use fintrack_core::goals::{GoalRepositoryTrait, NewGoal};
use fintrack_core::orders::{NewOrder, OrderRepositoryTrait, OrderType};
use fintrack_core::transfers::{
    SendMoneyRequest, TransferError, TransferRepositoryTrait, TransferStatus,
};
use fintrack_core::Error;
use fintrack_storage_sqlite::accounts::AccountRepository;
use fintrack_storage_sqlite::cards::CardRepository;
use fintrack_storage_sqlite::goals::GoalRepository;
use fintrack_storage_sqlite::orders::OrderRepository;
use fintrack_storage_sqlite::transfers::TransferRepository;
use fintrack_storage_sqlite::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

struct TestDb {
    _dir: TempDir,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let db_path = init(path.to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

/// Creates an account and seeds its balance directly in the table.
async fn account(db: &TestDb, name: &str, balance: Decimal, is_demo: bool) -> Account {
    let mut created = AccountRepository::new(db.pool.clone(), db.writer.clone())
        .create(NewAccount {
            name: name.to_string(),
            email: format!("{}@example.com", name),
            is_demo,
        })
        .await
        .unwrap();
    assert_eq!(created.balance, Decimal::ZERO);

    let mut conn = db.pool.get().unwrap();
    diesel::sql_query("UPDATE accounts SET balance = ? WHERE id = ?")
        .bind::<Text, _>(balance.to_string())
        .bind::<Text, _>(&created.id)
        .execute(&mut conn)
        .unwrap();
    created.balance = balance;
    created
}

fn send(to: &str, amount: Decimal) -> SendMoneyRequest {
    SendMoneyRequest {
        recipient_email: to.to_string(),
        amount,
        note: Some("rent".to_string()),
        payment_method: None,
        schedule_date: None,
        idempotency_key: None,
    }
}

#[tokio::test]
async fn transfer_commits_both_balances_and_one_record() {
    let db = setup();
    let accounts = AccountRepository::new(db.pool.clone(), db.writer.clone());
    let transfers = TransferRepository::new(db.pool.clone(), db.writer.clone());
    let alice = account(&db, "alice", dec!(100), false).await;
    let bob = account(&db, "bob", dec!(5), false).await;

    let request = send("bob@example.com", dec!(50))
        .into_transfer_request(&alice.id)
        .unwrap();
    let receipt = transfers.execute_transfer(request).await.unwrap();

    assert_eq!(receipt.balance, dec!(50));
    assert_eq!(receipt.transfer.status, TransferStatus::Completed);
    assert_eq!(accounts.get_by_id(&alice.id).unwrap().balance, dec!(50));
    assert_eq!(accounts.get_by_id(&bob.id).unwrap().balance, dec!(55));
    assert_eq!(transfers.list_for_account(&alice.id).unwrap().len(), 1);
    assert_eq!(transfers.list_for_account(&bob.id).unwrap().len(), 1);

    let stored = transfers.get_by_id(&receipt.transfer.id).unwrap();
    assert_eq!(stored.note, "rent");
    assert_eq!(stored.amount, dec!(50));
}

#[tokio::test]
async fn failed_transfer_rolls_back() {
    let db = setup();
    let accounts = AccountRepository::new(db.pool.clone(), db.writer.clone());
    let transfers = TransferRepository::new(db.pool.clone(), db.writer.clone());
    let alice = account(&db, "alice", dec!(100), false).await;
    account(&db, "bob", dec!(0), false).await;

    let request = send("bob@example.com", dec!(150))
        .into_transfer_request(&alice.id)
        .unwrap();
    let err = transfers.execute_transfer(request).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Transfer(TransferError::InsufficientFunds { .. })
    ));
    assert_eq!(accounts.get_by_id(&alice.id).unwrap().balance, dec!(100));
    assert!(transfers.list_for_account(&alice.id).unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_transfers_cannot_overdraw() {
    let db = setup();
    let accounts = AccountRepository::new(db.pool.clone(), db.writer.clone());
    let transfers = Arc::new(TransferRepository::new(db.pool.clone(), db.writer.clone()));
    let alice = account(&db, "alice", dec!(100), false).await;
    account(&db, "bob", dec!(0), false).await;

    let mut handles = Vec::new();
    for _ in 0..5 {
        let transfers = transfers.clone();
        let request = send("bob@example.com", dec!(30))
            .into_transfer_request(&alice.id)
            .unwrap();
        handles.push(tokio::spawn(async move {
            transfers.execute_transfer(request).await
        }));
    }
    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 3);
    assert_eq!(accounts.get_by_id(&alice.id).unwrap().balance, dec!(10));
}

#[tokio::test]
async fn idempotent_replay_is_stored_once() {
    let db = setup();
    let transfers = TransferRepository::new(db.pool.clone(), db.writer.clone());
    let alice = account(&db, "alice", dec!(100), false).await;
    account(&db, "bob", dec!(0), false).await;

    let mut raw = send("bob@example.com", dec!(10));
    raw.idempotency_key = Some("abc".to_string());
    let first = transfers
        .execute_transfer(raw.clone().into_transfer_request(&alice.id).unwrap())
        .await
        .unwrap();
    let replay = transfers
        .execute_transfer(raw.into_transfer_request(&alice.id).unwrap())
        .await
        .unwrap();

    assert!(replay.replayed);
    assert_eq!(replay.transfer.id, first.transfer.id);
    assert_eq!(replay.balance, dec!(90));
    assert_eq!(transfers.list_for_account(&alice.id).unwrap().len(), 1);
}

#[tokio::test]
async fn due_scheduled_transfers_are_settled() {
    let db = setup();
    let transfers = TransferRepository::new(db.pool.clone(), db.writer.clone());
    let alice = account(&db, "alice", dec!(100), false).await;
    account(&db, "bob", dec!(0), false).await;

    let due = Utc::now() + Duration::hours(1);
    let mut raw = send("bob@example.com", dec!(10));
    raw.schedule_date = Some(due);
    let receipt = transfers
        .execute_transfer(raw.into_transfer_request(&alice.id).unwrap())
        .await
        .unwrap();
    assert_eq!(receipt.transfer.status, TransferStatus::Pending);

    assert_eq!(transfers.complete_due_transfers(Utc::now()).await.unwrap(), 0);
    assert_eq!(
        transfers
            .complete_due_transfers(due + Duration::minutes(1))
            .await
            .unwrap(),
        1
    );
    let stored = transfers.get_by_id(&receipt.transfer.id).unwrap();
    assert_eq!(stored.status, TransferStatus::Completed);
}

#[tokio::test]
async fn contributions_persist_and_respect_ownership() {
    let db = setup();
    let goals = GoalRepository::new(db.pool.clone(), db.writer.clone());
    let alice = account(&db, "alice", dec!(0), false).await;
    let bob = account(&db, "bob", dec!(0), false).await;

    let goal = goals
        .insert_new_goal(
            &alice.id,
            NewGoal {
                name: "Trip".to_string(),
                description: None,
                target: dec!(100),
                monthly_contribution: Some(dec!(25)),
                deadline: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                category: None,
                icon: None,
                priority: None,
            },
        )
        .await
        .unwrap();

    goals.contribute(&goal.id, &alice.id, dec!(70)).await.unwrap();
    let updated = goals.contribute(&goal.id, &alice.id, dec!(30)).await.unwrap();
    assert_eq!(updated.current, dec!(100));

    let err = goals.contribute(&goal.id, &bob.id, dec!(5)).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(goals.get_goal(&goal.id).unwrap().current, dec!(100));
}

#[tokio::test]
async fn deleting_account_cascades_to_goals_and_orders_only() {
    let db = setup();
    let accounts = AccountRepository::new(db.pool.clone(), db.writer.clone());
    let goals = GoalRepository::new(db.pool.clone(), db.writer.clone());
    let orders = OrderRepository::new(db.pool.clone(), db.writer.clone());
    let transfers = TransferRepository::new(db.pool.clone(), db.writer.clone());
    let alice = account(&db, "alice", dec!(100), false).await;
    let bob = account(&db, "bob", dec!(0), false).await;

    goals
        .insert_new_goal(
            &bob.id,
            NewGoal {
                name: "Car".to_string(),
                description: None,
                target: dec!(1000),
                monthly_contribution: None,
                deadline: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                category: None,
                icon: None,
                priority: None,
            },
        )
        .await
        .unwrap();
    orders
        .place_order(
            &bob.id,
            NewOrder {
                order_type: OrderType::Buy,
                symbol: "AAPL".to_string(),
                name: "Apple".to_string(),
                shares: dec!(1),
                price: dec!(100),
            },
        )
        .await
        .unwrap();
    transfers
        .execute_transfer(
            send("bob@example.com", dec!(10))
                .into_transfer_request(&alice.id)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(accounts.delete(&bob.id).await.unwrap(), 1);

    assert!(goals.load_goals_for_account(&bob.id).unwrap().is_empty());
    assert!(orders.list_for_account(&bob.id).unwrap().is_empty());
    assert_eq!(transfers.list_for_account(&alice.id).unwrap().len(), 1);
}

#[tokio::test]
async fn oversell_is_rejected_inside_the_write() {
    let db = setup();
    let orders = OrderRepository::new(db.pool.clone(), db.writer.clone());
    let alice = account(&db, "alice", dec!(0), false).await;

    let buy = NewOrder {
        order_type: OrderType::Buy,
        symbol: "MSFT".to_string(),
        name: "Microsoft".to_string(),
        shares: dec!(2),
        price: dec!(300),
    };
    let stored = orders.place_order(&alice.id, buy.clone()).await.unwrap();
    assert_eq!(stored.total, dec!(600));

    let sell = NewOrder {
        order_type: OrderType::Sell,
        shares: dec!(3),
        ..buy
    };
    assert!(matches!(
        orders.place_order(&alice.id, sell).await.unwrap_err(),
        Error::Order(_)
    ));
    assert_eq!(orders.list_for_account(&alice.id).unwrap().len(), 1);
}

#[tokio::test]
async fn overflow_inside_a_write_job_leaves_the_writer_running() {
    let db = setup();
    let orders = OrderRepository::new(db.pool.clone(), db.writer.clone());
    let goals = GoalRepository::new(db.pool.clone(), db.writer.clone());
    let alice = account(&db, "alice", dec!(0), false).await;

    let huge = NewOrder {
        order_type: OrderType::Buy,
        symbol: "AAPL".to_string(),
        name: "Apple".to_string(),
        shares: Decimal::MAX,
        price: dec!(2),
    };
    let err = orders.place_order(&alice.id, huge).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(orders.list_for_account(&alice.id).unwrap().is_empty());

    let goal = goals
        .insert_new_goal(
            &alice.id,
            NewGoal {
                name: "Fund".to_string(),
                description: None,
                target: dec!(100),
                monthly_contribution: None,
                deadline: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                category: None,
                icon: None,
                priority: None,
            },
        )
        .await
        .unwrap();
    goals.contribute(&goal.id, &alice.id, dec!(1)).await.unwrap();
    let err = goals
        .contribute(&goal.id, &alice.id, Decimal::MAX)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(goals.get_goal(&goal.id).unwrap().current, dec!(1));

    account(&db, "bob", dec!(0), false).await;
}

#[tokio::test]
async fn duplicate_email_is_a_unique_violation() {
    let db = setup();
    let accounts = AccountRepository::new(db.pool.clone(), db.writer.clone());
    account(&db, "alice", dec!(0), false).await;

    let err = accounts
        .create(NewAccount {
            name: "Other".to_string(),
            email: "alice@example.com".to_string(),
            is_demo: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Database(fintrack_core::errors::DatabaseError::UniqueViolation(_))
    ));
}

fn card_record(last4: &str) -> NewCardRecord {
    NewCardRecord {
        card_name: "Everyday".to_string(),
        last4: last4.to_string(),
        expiry_date: "08/29".to_string(),
        brand: CardBrand::Mastercard,
    }
}

#[tokio::test]
async fn cards_are_owner_scoped_and_cascade_with_the_account() {
    let db = setup();
    let accounts = AccountRepository::new(db.pool.clone(), db.writer.clone());
    let cards = CardRepository::new(db.pool.clone(), db.writer.clone());
    let alice = account(&db, "alice", dec!(0), false).await;
    let bob = account(&db, "bob", dec!(0), false).await;

    let first = cards.insert_card(&alice.id, card_record("4444")).await.unwrap();
    let second = cards.insert_card(&alice.id, card_record("1111")).await.unwrap();
    cards.insert_card(&bob.id, card_record("2222")).await.unwrap();

    let listed = cards.list_for_account(&alice.id).unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|c| c.account_id == alice.id));
    assert_eq!(listed[0].brand, CardBrand::Mastercard);
    assert!(listed.iter().any(|c| c.id == first.id && c.last4 == "4444"));

    assert_eq!(cards.delete_for_account(&bob.id, &second.id).await.unwrap(), 0);
    assert_eq!(cards.delete_for_account(&alice.id, &second.id).await.unwrap(), 1);
    assert_eq!(cards.list_for_account(&alice.id).unwrap().len(), 1);

    assert_eq!(accounts.delete(&alice.id).await.unwrap(), 1);
    assert!(cards.list_for_account(&alice.id).unwrap().is_empty());
    assert_eq!(cards.list_for_account(&bob.id).unwrap().len(), 1);
}

#[tokio::test]
async fn card_for_unknown_account_is_rejected() {
    let db = setup();
    let cards = CardRepository::new(db.pool.clone(), db.writer.clone());

    let err = cards.insert_card("missing", card_record("4242")).await.unwrap_err();
    assert!(matches!(err, Error::Database(_) | Error::ConstraintViolation(_)));
}
