use application::service::{
    DeleteOrderService, GetBookService, GetOrderService, PlaceOrderService, UpdateOrderService,
};
use application::transfer::{
    DeleteOrderDto, GetBookDto, GetOrderDto, PlaceOrderDto, UpdateOrderDto,
};
use std::time::Duration;

use driver::database::MemoryDatabase;
use kernel::interface::database::DatabaseConnection;
use kernel::prelude::entity::Identity;
use kernel::KernelError;
use uuid::Uuid;

const SEEDED_ORDER: &str = "95ca0e2b-357c-46bb-bd50-b82d17cca0e5";

fn order(book_id: i32, amount: i32) -> PlaceOrderDto {
    PlaceOrderDto {
        book_id,
        amount,
        country_code: None,
    }
}

async fn stock_of(db: &MemoryDatabase, id: i32) -> error_stack::Result<i32, KernelError> {
    let book = db.get_book(&GetBookDto { id }).await?;
    Ok(book.map(|b| b.stock).unwrap_or_default())
}

#[tokio::test]
async fn placing_an_order_withdraws_stock() -> error_stack::Result<(), KernelError> {
    let db = MemoryDatabase::seeded()?;

    let placed = db.place_order(&Identity::anonymous(), order(201, 1)).await?;
    assert_eq!(stock_of(&db, 201).await?, 11);
    assert_eq!(placed.created_by, "anonymous");
    assert_eq!(placed.modified_by, "anonymous");
    assert_eq!(placed.created_at, placed.modified_at);

    let found = db.get_order(&GetOrderDto { id: placed.id }).await?;
    assert_eq!(found, Some(placed));
    assert_eq!(db.get_all_orders().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn overselling_changes_nothing() -> error_stack::Result<(), KernelError> {
    let db = MemoryDatabase::seeded()?;

    let report = db
        .place_order(&Identity::anonymous(), order(201, 13))
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::OutOfStock);
    assert_eq!(stock_of(&db, 201).await?, 12);
    assert_eq!(db.get_all_orders().await?.len(), 1);

    db.place_order(&Identity::anonymous(), order(201, 12)).await?;
    assert_eq!(stock_of(&db, 201).await?, 0);
    Ok(())
}

#[tokio::test]
async fn invalid_placements_are_rejected() -> error_stack::Result<(), KernelError> {
    let db = MemoryDatabase::seeded()?;

    let invalid = [
        order(201, 0),
        order(201, -2),
        order(999, 1),
        PlaceOrderDto {
            country_code: Some("germany".to_string()),
            ..order(201, 1)
        },
    ];
    for dto in invalid {
        let report = db
            .place_order(&Identity::anonymous(), dto)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
    }
    assert_eq!(stock_of(&db, 201).await?, 12);
    assert_eq!(db.get_all_orders().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleting_keeps_withdrawn_stock() -> error_stack::Result<(), KernelError> {
    let db = MemoryDatabase::seeded()?;

    let placed = db.place_order(&Identity::anonymous(), order(271, 5)).await?;
    db.delete_order(&DeleteOrderDto { id: placed.id }).await?;
    assert_eq!(stock_of(&db, 271).await?, 17);
    assert!(db.get_order(&GetOrderDto { id: placed.id }).await?.is_none());

    let report = db
        .delete_order(&DeleteOrderDto { id: placed.id })
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::NotFound);
    Ok(())
}

#[tokio::test]
async fn updating_restamps_modification() -> error_stack::Result<(), KernelError> {
    let db = MemoryDatabase::seeded()?;
    let id = Uuid::parse_str(SEEDED_ORDER).unwrap();
    let before = db.get_order(&GetOrderDto { id }).await?.unwrap();

    let updated = db
        .update_order(
            &Identity::new("clerk"),
            UpdateOrderDto {
                id,
                country_code: Some(Some("GB".to_string())),
            },
        )
        .await?;
    assert_eq!(updated.country_code.as_deref(), Some("GB"));
    assert_eq!(updated.created_at, before.created_at);
    assert_eq!(updated.created_by, before.created_by);
    assert_eq!(updated.modified_by, "clerk");
    assert!(updated.modified_at > before.modified_at);
    assert_eq!(updated.amount, before.amount);

    let kept = db
        .update_order(
            &Identity::anonymous(),
            UpdateOrderDto {
                id,
                country_code: None,
            },
        )
        .await?;
    assert_eq!(kept.country_code.as_deref(), Some("GB"));

    let invalid = db
        .update_order(
            &Identity::anonymous(),
            UpdateOrderDto {
                id,
                country_code: Some(Some("gb".to_string())),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(invalid.current_context(), &KernelError::Validation);

    let missing = db
        .update_order(
            &Identity::anonymous(),
            UpdateOrderDto {
                id: Uuid::new_v4(),
                country_code: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(missing.current_context(), &KernelError::NotFound);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_placements_never_oversell() -> error_stack::Result<(), KernelError> {
    let db = MemoryDatabase::seeded()?;

    let tasks = (0..20)
        .map(|_| {
            let db = db.clone();
            tokio::spawn(async move { db.place_order(&Identity::anonymous(), order(207, 1)).await })
        })
        .collect::<Vec<_>>();

    let mut placed = 0;
    let mut refused = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => placed += 1,
            Err(report) => {
                assert_eq!(report.current_context(), &KernelError::OutOfStock);
                refused += 1;
            }
        }
    }
    assert_eq!(placed, 11);
    assert_eq!(refused, 9);
    assert_eq!(stock_of(&db, 207).await?, 0);
    assert_eq!(db.get_all_orders().await?.len(), 12);
    Ok(())
}

#[tokio::test]
async fn stamps_keep_microsecond_precision() -> error_stack::Result<(), KernelError> {
    let db = MemoryDatabase::seeded()?;

    let placed = db.place_order(&Identity::anonymous(), order(207, 1)).await?;
    assert_eq!(placed.created_at.nanosecond() % 1_000, 0);
    assert_eq!(placed.modified_at.nanosecond() % 1_000, 0);

    let updated = db
        .update_order(
            &Identity::anonymous(),
            UpdateOrderDto {
                id: placed.id,
                country_code: Some(Some("FR".to_string())),
            },
        )
        .await?;
    assert_eq!(updated.modified_at.nanosecond() % 1_000, 0);
    Ok(())
}

#[tokio::test]
async fn reads_do_not_wait_for_an_open_transaction() -> error_stack::Result<(), KernelError> {
    let db = MemoryDatabase::seeded()?.with_lock_timeout(Duration::from_millis(50));
    let _writing = db.transact().await?;

    let orders = tokio::time::timeout(Duration::from_millis(50), db.get_all_orders())
        .await
        .map_err(|_| error_stack::Report::new(KernelError::Timeout))??;
    assert_eq!(orders.len(), 1);
    let book = db.get_book(&GetBookDto { id: 201 }).await?;
    assert_eq!(book.map(|b| b.stock), Some(12));

    let report = db
        .place_order(&Identity::anonymous(), order(201, 1))
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::Timeout);
    Ok(())
}
