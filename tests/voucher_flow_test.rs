mod common;

use assert_matches::assert_matches;
use common::TestCore;
use kardex_core::{
    config::StockPolicy,
    errors::ServiceError,
    services::vouchers::{LineInput, UpdateVoucherRequest, VoucherQuery},
};
use rust_decimal_macros::dec;
use std::time::Duration;

#[tokio::test]
async fn ingress_blends_moving_average() {
    let t = TestCore::new().await;

    t.apply_single_line("VA-0001", t.ingress_type_id, dec!(10), dec!(5.00))
        .await;
    let level = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.article_id)
        .await
        .expect("balance");
    assert_eq!(level.quantity, dec!(10));
    assert_eq!(level.average_cost, dec!(5.0000));

    t.apply_single_line("VA-0002", t.ingress_type_id, dec!(10), dec!(7.00))
        .await;
    let level = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.article_id)
        .await
        .expect("balance");
    assert_eq!(level.quantity, dec!(20));
    assert_eq!(level.average_cost, dec!(6.0000));
}

#[tokio::test]
async fn egress_consumes_at_running_average_without_changing_it() {
    let t = TestCore::new().await;
    t.apply_single_line("VB-0001", t.ingress_type_id, dec!(10), dec!(5.00))
        .await;
    t.apply_single_line("VB-0002", t.ingress_type_id, dec!(10), dec!(7.00))
        .await;

    t.apply_single_line("VB-0003", t.egress_type_id, dec!(5), dec!(0))
        .await;

    let level = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.article_id)
        .await
        .expect("balance");
    assert_eq!(level.quantity, dec!(15));
    assert_eq!(level.average_cost, dec!(6.0000));

    let page = t
        .core
        .kardex()
        .list_kardex(t.warehouse_id, t.article_id, None, None, 1, 50)
        .await
        .expect("kardex");
    assert_eq!(page.total, 3);
    let egress_entry = page.entries.last().expect("egress entry");
    assert_eq!(egress_entry.quantity, dec!(-5));
    assert_eq!(egress_entry.unit_cost, dec!(6.0000));
}

#[tokio::test]
async fn duplicate_voucher_code_creates_no_row() {
    let t = TestCore::new().await;
    t.create_voucher("VC-0001", t.ingress_type_id).await;

    let err = t
        .core
        .vouchers()
        .create_voucher(t.create_request("VC-0001", t.egress_type_id))
        .await
        .expect_err("duplicate code must be rejected");
    assert_matches!(err, ServiceError::DuplicateCode(code) if code == "VC-0001");

    let listed = t
        .core
        .vouchers()
        .list_vouchers(VoucherQuery::default())
        .await
        .expect("list");
    assert_eq!(listed.total, 1);
}

#[tokio::test]
async fn unknown_article_rejects_the_whole_batch() {
    let t = TestCore::new().await;
    let voucher_id = t.create_voucher("VD-0001", t.ingress_type_id).await;

    let err = t
        .core
        .vouchers()
        .add_lines(
            voucher_id,
            vec![
                LineInput {
                    article_id: t.article_id,
                    quantity: dec!(4),
                    unit_cost: dec!(2.50),
                    item_number: Some(1),
                },
                LineInput {
                    article_id: 999_999,
                    quantity: dec!(1),
                    unit_cost: dec!(1.00),
                    item_number: Some(2),
                },
            ],
        )
        .await
        .expect_err("batch with unknown article must fail");
    assert_matches!(err, ServiceError::ArticleNotFound(999_999));

    let level = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.article_id)
        .await
        .expect("balance");
    assert_eq!(level.quantity, dec!(0));

    let totals = t
        .core
        .kardex()
        .movement_totals(t.warehouse_id, t.article_id)
        .await
        .expect("totals");
    assert_eq!(totals.entries, 0);
    assert_eq!(totals.quantity, dec!(0));
}

#[tokio::test]
async fn invalid_lines_are_rejected_before_any_mutation() {
    let t = TestCore::new().await;
    let voucher_id = t.create_voucher("VE-0001", t.ingress_type_id).await;

    let err = t
        .core
        .vouchers()
        .add_lines(
            voucher_id,
            vec![LineInput {
                article_id: t.article_id,
                quantity: dec!(0),
                unit_cost: dec!(1),
                item_number: None,
            }],
        )
        .await
        .expect_err("zero quantity must fail");
    assert_matches!(err, ServiceError::InvalidQuantity(_));

    let err = t
        .core
        .vouchers()
        .add_lines(
            voucher_id,
            vec![LineInput {
                article_id: t.article_id,
                quantity: dec!(1),
                unit_cost: dec!(-0.01),
                item_number: None,
            }],
        )
        .await
        .expect_err("negative cost must fail");
    assert_matches!(err, ServiceError::InvalidUnitCost(_));

    let err = t
        .core
        .vouchers()
        .add_lines(voucher_id, vec![])
        .await
        .expect_err("empty batch must fail");
    assert_matches!(err, ServiceError::ValidationError(_));

    // Nothing above may have touched the ledger; the voucher still takes a
    // valid batch afterwards.
    t.core
        .vouchers()
        .add_lines(
            voucher_id,
            vec![LineInput {
                article_id: t.article_id,
                quantity: dec!(2),
                unit_cost: dec!(3),
                item_number: None,
            }],
        )
        .await
        .expect("valid batch after rejected ones");
}

#[tokio::test]
async fn applied_voucher_takes_no_further_lines() {
    let t = TestCore::new().await;
    let voucher_id = t.create_voucher("VF-0001", t.ingress_type_id).await;

    t.core
        .vouchers()
        .add_lines(
            voucher_id,
            vec![LineInput {
                article_id: t.article_id,
                quantity: dec!(3),
                unit_cost: dec!(4),
                item_number: None,
            }],
        )
        .await
        .expect("first batch");

    let err = t
        .core
        .vouchers()
        .add_lines(
            voucher_id,
            vec![LineInput {
                article_id: t.other_article_id,
                quantity: dec!(1),
                unit_cost: dec!(1),
                item_number: None,
            }],
        )
        .await
        .expect_err("second batch must be rejected");
    assert_matches!(err, ServiceError::VoucherImmutable(_));

    // The rejected batch left no trace.
    let level = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.other_article_id)
        .await
        .expect("balance");
    assert_eq!(level.quantity, dec!(0));
}

#[tokio::test]
async fn inactivation_cascades_to_lines_and_preserves_stock() {
    let t = TestCore::new().await;
    let voucher_id = t
        .apply_single_line("VG-0001", t.ingress_type_id, dec!(8), dec!(2.50))
        .await;

    t.core
        .vouchers()
        .inactivate_voucher(voucher_id)
        .await
        .expect("inactivate");

    let with_lines = t
        .core
        .vouchers()
        .get_voucher(voucher_id)
        .await
        .expect("get voucher");
    assert!(!with_lines.voucher.is_active);
    assert!(with_lines.lines.iter().all(|line| !line.is_active));

    // Non-reversing inactivation: the applied stock effect stays.
    let level = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.article_id)
        .await
        .expect("balance");
    assert_eq!(level.quantity, dec!(8));
    assert_eq!(level.average_cost, dec!(2.5000));

    let active_only = t
        .core
        .vouchers()
        .list_vouchers(VoucherQuery::default())
        .await
        .expect("list");
    assert_eq!(active_only.total, 0);

    let with_inactive = t
        .core
        .vouchers()
        .list_vouchers(VoucherQuery {
            include_inactive: true,
            ..VoucherQuery::default()
        })
        .await
        .expect("list inactive");
    assert_eq!(with_inactive.total, 1);
}

#[tokio::test]
async fn kardex_matches_balance_across_mixed_movements() {
    let t = TestCore::new().await;
    t.apply_single_line("VH-0001", t.ingress_type_id, dec!(10), dec!(4.00))
        .await;
    t.apply_single_line("VH-0002", t.egress_type_id, dec!(3), dec!(0))
        .await;
    t.apply_single_line("VH-0003", t.ingress_type_id, dec!(5), dec!(6.40))
        .await;
    t.apply_single_line("VH-0004", t.egress_type_id, dec!(2), dec!(0))
        .await;

    let level = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.article_id)
        .await
        .expect("balance");
    let totals = t
        .core
        .kardex()
        .movement_totals(t.warehouse_id, t.article_id)
        .await
        .expect("totals");

    // Cross-check invariant: the balance is exactly the kardex sum.
    assert_eq!(totals.entries, 4);
    assert_eq!(totals.quantity, level.quantity);
    assert_eq!(level.quantity, dec!(10));

    // (7 * 4.0000 + 5 * 6.4000) / 12 = 5.0000
    assert_eq!(level.average_cost, dec!(5.0000));

    let page = t
        .core
        .kardex()
        .list_kardex(t.warehouse_id, t.article_id, None, None, 1, 50)
        .await
        .expect("kardex");
    assert_eq!(page.entries.len(), 4);
    assert!(page
        .entries
        .windows(2)
        .all(|pair| pair[0].recorded_at <= pair[1].recorded_at));

    // Every egress entry was booked at the average in effect before it.
    assert_eq!(page.entries[1].unit_cost, dec!(4.0000));
    assert_eq!(page.entries[3].unit_cost, dec!(5.0000));
}

#[tokio::test]
async fn lines_apply_in_item_number_order() {
    let t = TestCore::new().await;
    let voucher_id = t.create_voucher("VI-0001", t.ingress_type_id).await;

    t.core
        .vouchers()
        .add_lines(
            voucher_id,
            vec![
                LineInput {
                    article_id: t.article_id,
                    quantity: dec!(2),
                    unit_cost: dec!(9.00),
                    item_number: Some(2),
                },
                LineInput {
                    article_id: t.article_id,
                    quantity: dec!(1),
                    unit_cost: dec!(3.00),
                    item_number: Some(1),
                },
            ],
        )
        .await
        .expect("batch");

    let with_lines = t
        .core
        .vouchers()
        .get_voucher(voucher_id)
        .await
        .expect("get voucher");
    let numbers: Vec<i32> = with_lines.lines.iter().map(|l| l.item_number).collect();
    assert_eq!(numbers, vec![1, 2]);

    // Item 1 (qty 1 @ 3.00) applied before item 2 (qty 2 @ 9.00):
    // first average 3.0000, then (1*3 + 2*9) / 3 = 7.0000.
    let page = t
        .core
        .kardex()
        .list_kardex(t.warehouse_id, t.article_id, None, None, 1, 10)
        .await
        .expect("kardex");
    assert_eq!(page.entries[0].unit_cost, dec!(3.00));
    assert_eq!(page.entries[1].unit_cost, dec!(9.00));

    let level = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.article_id)
        .await
        .expect("balance");
    assert_eq!(level.average_cost, dec!(7.0000));
}

#[tokio::test]
async fn duplicate_item_numbers_are_rejected() {
    let t = TestCore::new().await;
    let voucher_id = t.create_voucher("VJ-0001", t.ingress_type_id).await;

    let err = t
        .core
        .vouchers()
        .add_lines(
            voucher_id,
            vec![
                LineInput {
                    article_id: t.article_id,
                    quantity: dec!(1),
                    unit_cost: dec!(1),
                    item_number: Some(1),
                },
                LineInput {
                    article_id: t.other_article_id,
                    quantity: dec!(1),
                    unit_cost: dec!(1),
                    item_number: Some(1),
                },
            ],
        )
        .await
        .expect_err("duplicate item numbers must fail");
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn negative_stock_is_a_policy_decision() {
    let t = TestCore::new().await;

    // Default policy mirrors the observed behavior: egress from an empty
    // pair drives the balance negative.
    t.apply_single_line("VK-0001", t.egress_type_id, dec!(5), dec!(0))
        .await;
    let level = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.article_id)
        .await
        .expect("balance");
    assert_eq!(level.quantity, dec!(-5));
    assert_eq!(level.average_cost, dec!(0));

    // With the check enabled the batch is rejected and rolled back.
    let strict = t.core_with_policy(StockPolicy {
        allow_negative_stock: false,
        lock_wait: Duration::from_secs(5),
    });
    let voucher = strict
        .vouchers()
        .create_voucher(t.create_request("VK-0002", t.egress_type_id))
        .await
        .expect("create voucher");
    let err = strict
        .vouchers()
        .add_lines(
            voucher.id,
            vec![LineInput {
                article_id: t.other_article_id,
                quantity: dec!(1),
                unit_cost: dec!(0),
                item_number: None,
            }],
        )
        .await
        .expect_err("insufficient stock must fail");
    assert_matches!(err, ServiceError::InsufficientStock { .. });

    let untouched = strict
        .stock()
        .get_balance(t.warehouse_id, t.other_article_id)
        .await
        .expect("balance");
    assert_eq!(untouched.quantity, dec!(0));
}

#[tokio::test]
async fn header_metadata_stays_editable_but_structure_freezes() {
    let t = TestCore::new().await;
    let voucher_id = t
        .apply_single_line("VL-0001", t.ingress_type_id, dec!(1), dec!(1))
        .await;

    // Metadata edits are fine after application.
    let updated = t
        .core
        .vouchers()
        .update_voucher_header(
            voucher_id,
            UpdateVoucherRequest {
                document_number: Some("000456".to_string()),
                ..UpdateVoucherRequest::default()
            },
        )
        .await
        .expect("metadata update");
    assert_eq!(updated.document_number.as_deref(), Some("000456"));

    // Structural edits are not.
    let err = t
        .core
        .vouchers()
        .update_voucher_header(
            voucher_id,
            UpdateVoucherRequest {
                movement_type_id: Some(t.egress_type_id),
                ..UpdateVoucherRequest::default()
            },
        )
        .await
        .expect_err("structural change must fail");
    assert_matches!(err, ServiceError::VoucherImmutable(_));
}

#[tokio::test]
async fn voucher_search_filters_compose() {
    let t = TestCore::new().await;
    t.apply_single_line("VM-0001", t.ingress_type_id, dec!(1), dec!(1))
        .await;
    t.apply_single_line("VM-0002", t.egress_type_id, dec!(1), dec!(0))
        .await;

    let by_movement = t
        .core
        .vouchers()
        .list_vouchers(VoucherQuery {
            movement_type_id: Some(t.ingress_type_id),
            ..VoucherQuery::default()
        })
        .await
        .expect("by movement type");
    assert_eq!(by_movement.total, 1);
    assert_eq!(by_movement.vouchers[0].code, "VM-0001");

    let by_actor = t
        .core
        .vouchers()
        .list_vouchers(VoucherQuery {
            actor_name: Some("John".to_string()),
            ..VoucherQuery::default()
        })
        .await
        .expect("by actor substring");
    assert_eq!(by_actor.total, 2);

    let by_partner = t
        .core
        .vouchers()
        .list_vouchers(VoucherQuery {
            partner_name: Some("Acme".to_string()),
            ..VoucherQuery::default()
        })
        .await
        .expect("by partner substring");
    assert_eq!(by_partner.total, 2);

    let future_only = t
        .core
        .vouchers()
        .list_vouchers(VoucherQuery {
            date_from: Some("2999-01-01".to_string()),
            ..VoucherQuery::default()
        })
        .await
        .expect("future range");
    assert_eq!(future_only.total, 0);

    let err = t
        .core
        .vouchers()
        .list_vouchers(VoucherQuery {
            date_from: Some("01-06-2024".to_string()),
            ..VoucherQuery::default()
        })
        .await
        .expect_err("bad date must fail");
    assert_matches!(err, ServiceError::InvalidDateFormat(_));
}

#[tokio::test]
async fn missing_references_are_rejected_on_create() {
    let t = TestCore::new().await;

    let mut request = t.create_request("VN-0001", t.ingress_type_id);
    request.warehouse_id = 424_242;
    let err = t
        .core
        .vouchers()
        .create_voucher(request)
        .await
        .expect_err("unknown warehouse");
    assert_matches!(err, ServiceError::WarehouseNotFound(424_242));

    let mut request = t.create_request("VN-0001", t.ingress_type_id);
    request.partner_id = Some(424_242);
    let err = t
        .core
        .vouchers()
        .create_voucher(request)
        .await
        .expect_err("unknown partner");
    assert_matches!(err, ServiceError::PartnerNotFound(424_242));

    let err = t
        .core
        .vouchers()
        .get_voucher(424_242)
        .await
        .expect_err("unknown voucher");
    assert_matches!(err, ServiceError::VoucherNotFound(424_242));
}

#[tokio::test]
async fn balances_are_tracked_per_pair() {
    let t = TestCore::new().await;
    t.apply_single_line("VO-0001", t.ingress_type_id, dec!(4), dec!(10.00))
        .await;

    // Same article in another warehouse is a distinct pair.
    let request = kardex_core::services::vouchers::CreateVoucherRequest {
        warehouse_id: t.other_warehouse_id,
        ..t.create_request("VO-0002", t.ingress_type_id)
    };
    let voucher = t
        .core
        .vouchers()
        .create_voucher(request)
        .await
        .expect("create voucher");
    t.core
        .vouchers()
        .add_lines(
            voucher.id,
            vec![LineInput {
                article_id: t.article_id,
                quantity: dec!(7),
                unit_cost: dec!(20.00),
                item_number: None,
            }],
        )
        .await
        .expect("apply");

    let main = t
        .core
        .stock()
        .get_balance(t.warehouse_id, t.article_id)
        .await
        .expect("main balance");
    let other = t
        .core
        .stock()
        .get_balance(t.other_warehouse_id, t.article_id)
        .await
        .expect("other balance");
    assert_eq!((main.quantity, main.average_cost), (dec!(4), dec!(10.0000)));
    assert_eq!((other.quantity, other.average_cost), (dec!(7), dec!(20.0000)));
}
