use anyhow::Result;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, LoaderTrait, ModelTrait, PaginatorTrait, Set};

use super::{seed_car, seed_user, setup_test_db};
use crate::{account, car, payment, penalty, rental, user};

#[tokio::test]
async fn test_user_create_and_lookup() -> Result<()> {
    let db = setup_test_db().await?;

    let u = seed_user(&db, "crud_user@example.com").await?;
    assert_eq!(u.role, user::Role::User);

    let found = user::find_by_email(&db, "crud_user@example.com").await?;
    assert_eq!(found.map(|f| f.id), Some(u.id));

    let missing = user::find_by_email(&db, "nobody@example.com").await?;
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn test_user_email_is_unique() -> Result<()> {
    let db = setup_test_db().await?;

    seed_user(&db, "dup@example.com").await?;
    let second = user::create(&db, "Other", "dup@example.com", "$argon2id$v=19$x".into(), user::Role::User).await;
    assert!(matches!(&second, Err(e) if e.is_unique_violation()));
    assert_eq!(user::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_user_create_rejects_invalid_input() -> Result<()> {
    let db = setup_test_db().await?;

    let bad_email = user::create(&db, "X", "not-an-email", "hash".into(), user::Role::User).await;
    assert!(matches!(bad_email, Err(crate::errors::ModelError::Validation(_))));
    let bad_name = user::create(&db, " ", "x@example.com", "hash".into(), user::Role::User).await;
    assert!(matches!(bad_name, Err(crate::errors::ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_account_belongs_to_user() -> Result<()> {
    let db = setup_test_db().await?;
    let u = seed_user(&db, "profile@example.com").await?;

    let now = Utc::now();
    let am = account::ActiveModel {
        user_id: Set(u.id),
        phone: Set(Some("0812345678".into())),
        address: Set(Some("Jl. Merdeka 1".into())),
        profile_photo: Set(Some("https://cdn.example.com/p.png".into())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };
    let acc = am.insert(&db).await?;

    let by_user = account::find_by_user(&db, u.id).await?.expect("account");
    assert_eq!(by_user.id, acc.id);

    let related = u.find_related(account::Entity).one(&db).await?;
    assert_eq!(related.map(|a| a.id), Some(acc.id));
    Ok(())
}

#[tokio::test]
async fn test_car_bulk_insert_and_validation() -> Result<()> {
    let db = setup_test_db().await?;

    let rows = vec![
        car::NewCar {
            brand: "Toyota".into(),
            model: "Innova".into(),
            price_per_day: 500_000.0,
            availability: true,
            image_url: None,
            description: None,
            owner_name: "Andi".into(),
            owner_phone: None,
            rating: None,
        },
        car::NewCar {
            brand: "Suzuki".into(),
            model: "Ertiga".into(),
            price_per_day: 400_000.0,
            availability: false,
            image_url: Some("https://cdn.example.com/ertiga.png".into()),
            description: None,
            owner_name: "Budi".into(),
            owner_phone: None,
            rating: Some(4.8),
        },
    ];
    let inserted = car::create_many(&db, rows.clone()).await?;
    assert_eq!(inserted, 2);
    assert_eq!(car::Entity::find().count(&db).await?, 2);

    // one invalid row rejects the whole batch
    let mut bad = rows;
    bad[1].price_per_day = -1.0;
    assert!(car::create_many(&db, bad).await.is_err());
    assert_eq!(car::Entity::find().count(&db).await?, 2);

    assert_eq!(car::create_many(&db, vec![]).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_rental_with_payments_and_penalties() -> Result<()> {
    let db = setup_test_db().await?;
    let u = seed_user(&db, "renter@example.com").await?;
    let c = seed_car(&db, "Daihatsu", 300_000.0).await?;

    let start = Utc::now();
    let r = rental::create(&db, u.id, c.id, start.into(), (start + Duration::days(3)).into(), rental::RentalStatus::Approved).await?;
    let p = payment::create(&db, r.id, 900_000.0, payment::PaymentMethod::Bank, payment::PaymentStatus::Paid).await?;
    let pen = penalty::create(&db, r.id, "late_return", 150_000.0, "returned 1 day late").await?;
    assert_eq!(pen.penalty_type, "LATE_RETURN");

    let rentals = vec![r.clone()];
    let payments = rentals.load_many(payment::Entity, &db).await?;
    let penalties = rentals.load_many(penalty::Entity, &db).await?;
    let cars = rentals.load_one(car::Entity, &db).await?;
    assert_eq!(payments[0].len(), 1);
    assert_eq!(payments[0][0].id, p.id);
    assert_eq!(penalties[0].len(), 1);
    assert_eq!(cars[0].as_ref().map(|c| c.id), Some(c.id));

    // reversed range is refused before touching the database
    let bad = rental::create(&db, u.id, c.id, start.into(), start.into(), rental::RentalStatus::Pending).await;
    assert!(bad.is_err());

    // payments must be positive
    let zero = payment::create(&db, r.id, 0.0, payment::PaymentMethod::Ewallet, payment::PaymentStatus::Pending).await;
    assert!(zero.is_err());
    Ok(())
}

#[tokio::test]
async fn test_rental_requires_existing_car() -> Result<()> {
    let db = setup_test_db().await?;
    let u = seed_user(&db, "fk@example.com").await?;

    let start = Utc::now();
    let res = rental::create(&db, u.id, 9999, start.into(), (start + Duration::days(1)).into(), rental::RentalStatus::Pending).await;
    // FK 失败不是唯一约束冲突
    assert!(matches!(&res, Err(e) if !e.is_unique_violation()));
    Ok(())
}
