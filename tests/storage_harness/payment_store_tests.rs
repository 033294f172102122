//! Macro-generated test suite for `PaymentStore` contract validation.
//!
//! The `payment_store_tests!` macro generates a test module that validates
//! any `PaymentStore` implementation against the full contract: keyed
//! persistence, upsert semantics, predicate evaluation, ordering and paging.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use payments::storage::InMemoryPaymentStore;
//!
//! payment_store_tests!(InMemoryPaymentStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Persistence
//! - `test_save_and_get`: save then retrieve, every field intact
//! - `test_get_nonexistent`: unknown id yields None
//! - `test_exists`: true after save, false after delete
//! - `test_save_replaces_and_keeps_created_at`: upsert keeps the original creation time
//! - `test_updated_at_never_decreases`: repeated saves are monotonic
//! - `test_delete_nonexistent_is_noop`
//! - `test_amount_precision_preserved`
//!
//! ## Search
//! - `test_unrestricted_returns_everything`
//! - `test_currency_is_exact_and_case_sensitive`
//! - `test_min_amount_alone` / `test_max_amount_alone` / `test_amount_range_inclusive`
//! - `test_created_range_bounds_are_independent`
//! - `test_status_filter`
//! - `test_clauses_combine`
//!
//! ## Ordering & paging
//! - `test_sort_by_amount_both_directions`
//! - `test_absent_transaction_ref_sorts_last`
//! - `test_last_partial_page`: page 2 of size 10 over 21 matches
//! - `test_page_past_end`
//!
//! ## Concurrency
//! - `test_concurrent_saves`: parallel saves from spawned tasks

/// Generate a full `PaymentStore` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an empty store
/// implementing `PaymentStore + Clone + 'static`. It is re-evaluated for
/// each test to ensure isolation.
#[macro_export]
macro_rules! payment_store_tests {
    ($factory:expr) => {
        mod payment_store_contract_tests {
            use super::*;
            use payments::core::{
                Clause, PageRequest, PaymentFilter, PaymentStatus, PaymentStore, Predicate,
            };
            use uuid::Uuid;

            fn first_page(size: usize, sort_by: &str, direction: &str) -> PageRequest {
                PageRequest::new(0, size, sort_by, direction).unwrap()
            }

            async fn search(
                store: &impl PaymentStore,
                filter: PaymentFilter,
            ) -> (Vec<payments::core::Payment>, u64) {
                store
                    .find_all(
                        &Predicate::from_filter(&filter),
                        &first_page(100, "amount", "asc"),
                    )
                    .await
                    .unwrap()
            }

            // ==================================================================
            // Persistence
            // ==================================================================

            #[tokio::test]
            async fn test_save_and_get() {
                let store = $factory;
                let mut payment = test_payment("USD", "100.00", PaymentStatus::Pending);
                payment.transaction_ref_id = Some(Uuid::new_v4());
                payment.note = Some("first".to_string());

                let saved = store.save(payment.clone()).await.unwrap();
                assert_same_content(&saved, &payment);
                assert!(saved.updated_at >= saved.created_at);

                let retrieved = store.get(&payment.id).await.unwrap();
                assert_eq!(retrieved, Some(saved));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                assert!(store.get(&Uuid::new_v4()).await.unwrap().is_none());
                assert!(!store.exists(&Uuid::new_v4()).await.unwrap());
            }

            #[tokio::test]
            async fn test_exists() {
                let store = $factory;
                let saved = store
                    .save(test_payment("EUR", "5.00", PaymentStatus::Received))
                    .await
                    .unwrap();

                assert!(store.exists(&saved.id).await.unwrap());
                store.delete_by_id(&saved.id).await.unwrap();
                assert!(!store.exists(&saved.id).await.unwrap());
                assert!(store.get(&saved.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_save_replaces_and_keeps_created_at() {
                let store = $factory;
                let original = store
                    .save(test_payment_created_at("USD", "10.00", at(2026, 1, 1, 9)))
                    .await
                    .unwrap();

                let mut replacement = test_payment("GBP", "20.00", PaymentStatus::Approved);
                replacement.id = original.id;
                replacement.note = Some("replaced".to_string());

                let saved = store.save(replacement.clone()).await.unwrap();
                assert_same_content(&saved, &replacement);
                assert_eq!(saved.created_at, at(2026, 1, 1, 9));
                assert!(saved.updated_at >= original.updated_at);

                let (all, total) = search(&store, PaymentFilter::default()).await;
                assert_eq!(total, 1);
                assert_count(&all, 1);
            }

            #[tokio::test]
            async fn test_updated_at_never_decreases() {
                let store = $factory;
                let mut payment = store
                    .save(test_payment("USD", "1.00", PaymentStatus::Received))
                    .await
                    .unwrap();

                for _ in 0..3 {
                    let previous = payment.updated_at;
                    payment = store.save(payment.clone()).await.unwrap();
                    assert!(payment.updated_at >= previous);
                }
            }

            #[tokio::test]
            async fn test_delete_nonexistent_is_noop() {
                let store = $factory;
                let kept = store
                    .save(test_payment("USD", "1.00", PaymentStatus::Received))
                    .await
                    .unwrap();

                store.delete_by_id(&Uuid::new_v4()).await.unwrap();
                assert!(store.exists(&kept.id).await.unwrap());
            }

            #[tokio::test]
            async fn test_amount_precision_preserved() {
                let store = $factory;
                let saved = store
                    .save(test_payment("JPY", "9999999999.99", PaymentStatus::Received))
                    .await
                    .unwrap();

                let retrieved = store.get(&saved.id).await.unwrap().unwrap();
                assert_eq!(retrieved.amount, dec("9999999999.99"));
            }

            // ==================================================================
            // Search
            // ==================================================================

            async fn seed(store: &impl PaymentStore) {
                for (currency, amount, status) in [
                    ("USD", "10.00", PaymentStatus::Received),
                    ("USD", "50.00", PaymentStatus::Approved),
                    ("usd", "75.00", PaymentStatus::Approved),
                    ("EUR", "999.99", PaymentStatus::Declined),
                    ("GBP", "0.00", PaymentStatus::NotSent),
                ] {
                    store
                        .save(test_payment(currency, amount, status))
                        .await
                        .unwrap();
                }
            }

            #[tokio::test]
            async fn test_unrestricted_returns_everything() {
                let store = $factory;
                seed(&store).await;

                let (items, total) = search(&store, PaymentFilter::default()).await;
                assert_eq!(total, 5);
                assert_count(&items, 5);
            }

            #[tokio::test]
            async fn test_currency_is_exact_and_case_sensitive() {
                let store = $factory;
                seed(&store).await;

                let (items, total) =
                    search(&store, PaymentFilter::default().with_currency("USD")).await;
                assert_eq!(total, 2);
                assert!(items.iter().all(|p| p.currency == "USD"));

                let (_, total) =
                    search(&store, PaymentFilter::default().with_currency("CHF")).await;
                assert_eq!(total, 0);
            }

            #[tokio::test]
            async fn test_min_amount_alone() {
                let store = $factory;
                seed(&store).await;

                let (items, _) =
                    search(&store, PaymentFilter::default().with_min_amount(dec("50.00"))).await;
                assert_eq!(amounts(&items), vec!["50.00", "75.00", "999.99"]);
            }

            #[tokio::test]
            async fn test_max_amount_alone() {
                let store = $factory;
                seed(&store).await;

                let (items, _) =
                    search(&store, PaymentFilter::default().with_max_amount(dec("10.00"))).await;
                assert_eq!(amounts(&items), vec!["0.00", "10.00"]);
            }

            #[tokio::test]
            async fn test_amount_range_inclusive() {
                let store = $factory;
                seed(&store).await;

                let filter = PaymentFilter::default()
                    .with_min_amount(dec("10.00"))
                    .with_max_amount(dec("75.00"));
                let (items, total) = search(&store, filter).await;
                assert_eq!(total, 3);
                assert_eq!(amounts(&items), vec!["10.00", "50.00", "75.00"]);
            }

            #[tokio::test]
            async fn test_created_range_bounds_are_independent() {
                let store = $factory;
                for (amount, day) in [("1.00", 1), ("2.00", 10), ("3.00", 20)] {
                    store
                        .save(test_payment_created_at("USD", amount, at(2026, 3, day, 12)))
                        .await
                        .unwrap();
                }

                let (items, _) = search(
                    &store,
                    PaymentFilter::default().with_created_after(at(2026, 3, 10, 12)),
                )
                .await;
                assert_eq!(amounts(&items), vec!["2.00", "3.00"]);

                let (items, _) = search(
                    &store,
                    PaymentFilter::default().with_created_before(at(2026, 3, 10, 12)),
                )
                .await;
                assert_eq!(amounts(&items), vec!["1.00", "2.00"]);

                let (items, _) = search(
                    &store,
                    PaymentFilter::default()
                        .with_created_after(at(2026, 3, 2, 0))
                        .with_created_before(at(2026, 3, 19, 0)),
                )
                .await;
                assert_eq!(amounts(&items), vec!["2.00"]);
            }

            #[tokio::test]
            async fn test_status_filter() {
                let store = $factory;
                seed(&store).await;

                let (items, total) = search(
                    &store,
                    PaymentFilter::default().with_status(PaymentStatus::Approved),
                )
                .await;
                assert_eq!(total, 2);
                assert!(items.iter().all(|p| p.status == PaymentStatus::Approved));
            }

            #[tokio::test]
            async fn test_clauses_combine() {
                let store = $factory;
                seed(&store).await;

                let predicate = Predicate::unrestricted()
                    .and(Clause::StatusEq(PaymentStatus::Approved))
                    .and(Clause::CurrencyEq("USD".to_string()));
                let (items, total) = store
                    .find_all(&predicate, &first_page(10, "amount", "asc"))
                    .await
                    .unwrap();
                assert_eq!(total, 1);
                assert_eq!(amounts(&items), vec!["50.00"]);
            }

            // ==================================================================
            // Ordering & paging
            // ==================================================================

            #[tokio::test]
            async fn test_sort_by_amount_both_directions() {
                let store = $factory;
                seed(&store).await;
                let all = Predicate::unrestricted();

                let (asc, _) = store
                    .find_all(&all, &first_page(10, "amount", "asc"))
                    .await
                    .unwrap();
                assert_eq!(
                    amounts(&asc),
                    vec!["0.00", "10.00", "50.00", "75.00", "999.99"]
                );

                let (desc, _) = store
                    .find_all(&all, &first_page(10, "amount", "DESC"))
                    .await
                    .unwrap();
                assert_eq!(
                    amounts(&desc),
                    vec!["999.99", "75.00", "50.00", "10.00", "0.00"]
                );
            }

            #[tokio::test]
            async fn test_absent_transaction_ref_sorts_last() {
                let store = $factory;
                let mut with_ref = test_payment("USD", "1.00", PaymentStatus::Received);
                with_ref.transaction_ref_id = Some(Uuid::new_v4());
                let without_ref = test_payment("USD", "2.00", PaymentStatus::Received);
                store.save(with_ref.clone()).await.unwrap();
                store.save(without_ref.clone()).await.unwrap();

                for direction in ["asc", "desc"] {
                    let (items, _) = store
                        .find_all(
                            &Predicate::unrestricted(),
                            &first_page(10, "transactionRefId", direction),
                        )
                        .await
                        .unwrap();
                    assert_eq!(items[0].id, with_ref.id);
                    assert_eq!(items[1].id, without_ref.id);
                }
            }

            #[tokio::test]
            async fn test_last_partial_page() {
                let store = $factory;
                for i in 0..21 {
                    store
                        .save(test_payment("USD", &format!("{}.00", i), PaymentStatus::Pending))
                        .await
                        .unwrap();
                }

                let request = PageRequest::new(2, 10, "amount", "asc").unwrap();
                let (items, total) = store
                    .find_all(&Predicate::unrestricted(), &request)
                    .await
                    .unwrap();
                assert_eq!(total, 21);
                assert_eq!(amounts(&items), vec!["20.00"]);
            }

            #[tokio::test]
            async fn test_page_past_end() {
                let store = $factory;
                seed(&store).await;

                let request = PageRequest::new(7, 10, "updatedAt", "desc").unwrap();
                let (items, total) = store
                    .find_all(&Predicate::unrestricted(), &request)
                    .await
                    .unwrap();
                assert!(items.is_empty());
                assert_eq!(total, 5);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_saves() {
                let store = $factory;

                let handles: Vec<_> = (0..8)
                    .map(|i| {
                        let store = store.clone();
                        tokio::spawn(async move {
                            store
                                .save(test_payment("USD", &format!("{}.50", i), PaymentStatus::Received))
                                .await
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                let (items, total) = search(&store, PaymentFilter::default()).await;
                assert_eq!(total, 8);
                assert_count(&items, 8);
            }
        }
    };
}
