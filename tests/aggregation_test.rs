use pretty_assertions::assert_eq;
use sgsi_status::{Aggregator, Basis, Catalogue, Category, ItemId, Session, StatusValue};

fn confirmed_session() -> Session {
    let mut session = Session::default();
    session.confirm_profile("Ana", "Acme").unwrap();
    session
}

#[test]
fn test_recorded_statuses_show_up_in_metrics() {
    let catalogue = Catalogue::iso27001();
    let mut session = confirmed_session();

    session
        .record(catalogue, ItemId::from("4.1"), StatusValue::Defined)
        .unwrap();
    session
        .record(catalogue, ItemId::from("A.5.1"), StatusValue::Managed)
        .unwrap();

    let aggregator = Aggregator::new(catalogue, Basis::Catalogue);
    let store = session.store();

    let mandatory = aggregator.count_by_status(store, Category::MandatoryClause);
    assert_eq!(mandatory[&StatusValue::Defined], 1);
    assert_eq!(mandatory[&StatusValue::Unknown], 27);

    let annex = aggregator.count_by_status(store, Category::AnnexControl);
    assert_eq!(annex[&StatusValue::Managed], 1);
    assert_eq!(annex[&StatusValue::Unknown], 92);

    let pct = aggregator.percentage_by_status(store, Category::MandatoryClause);
    assert!((pct[&StatusValue::Unknown] - 27.0 / 28.0 * 100.0).abs() < 1e-9);
    let sum: f64 = pct.values().sum();
    assert!((sum - 100.0).abs() < 1e-9);

    let table = aggregator.metrics_table(store);
    let defined = table
        .rows
        .iter()
        .find(|row| row.status == StatusValue::Defined)
        .unwrap();
    assert_eq!(format!("{:.1}", defined.mandatory_pct), "3.6");
    assert_eq!(format!("{:.1}", defined.annex_pct), "0.0");
}

#[test]
fn test_overwriting_a_status_keeps_a_single_entry() {
    let catalogue = Catalogue::iso27001();
    let mut session = confirmed_session();

    session
        .record(catalogue, ItemId::from("A.8.24"), StatusValue::Initial)
        .unwrap();
    session
        .record(catalogue, ItemId::from("A.8.24"), StatusValue::Optimized)
        .unwrap();

    assert_eq!(session.store().len(), 1);
    assert_eq!(
        session.store().get_status(&ItemId::from("A.8.24")),
        StatusValue::Optimized
    );

    let recorded = Aggregator::new(catalogue, Basis::Recorded);
    let counts = recorded.count_by_status(session.store(), Category::AnnexControl);
    assert_eq!(counts[&StatusValue::Optimized], 1);
    assert_eq!(counts.values().sum::<usize>(), 1);
}

#[test]
fn test_empty_session_has_zero_percentages_and_an_empty_chart() {
    let session = confirmed_session();
    let aggregator = Aggregator::new(Catalogue::iso27001(), Basis::Recorded);

    for category in [Category::MandatoryClause, Category::AnnexControl] {
        let pct = aggregator.percentage_by_status(session.store(), category);
        assert!(pct.values().all(|value| *value == 0.0));
    }
    for basis in [Basis::Recorded, Basis::Catalogue] {
        assert!(Aggregator::new(Catalogue::iso27001(), basis)
            .chart_series(session.store())
            .values()
            .all(|count| *count == 0));
    }
}

#[test]
fn test_recording_requires_a_confirmed_profile() {
    let mut session = Session::default();
    let result = session.record(Catalogue::iso27001(), ItemId::from("4.1"), StatusValue::Defined);

    assert!(result.is_err());
    assert!(session.store().is_empty());
}

#[test]
fn test_visiting_a_section_defaults_items_to_unknown() {
    let catalogue = Catalogue::iso27001();
    let mut session = confirmed_session();
    session
        .record(catalogue, ItemId::from("4.1"), StatusValue::Defined)
        .unwrap();

    session.visit_section(catalogue, Category::MandatoryClause);

    assert_eq!(session.store().len(), 28);
    assert_eq!(
        session.store().get_status(&ItemId::from("4.1")),
        StatusValue::Defined
    );
    assert_eq!(
        session.store().get_status(&ItemId::from("10.2")),
        StatusValue::Unknown
    );
}

#[test]
fn test_typed_ids_with_padding_record_the_catalogue_item() {
    let catalogue = Catalogue::iso27001();
    let mut session = confirmed_session();

    session
        .record(catalogue, ItemId::new("  A.5.1 "), StatusValue::Managed)
        .unwrap();

    assert_eq!(session.store().entries()[0].item_id.as_str(), "A.5.1");
    assert_eq!(
        session.store().get_status(&ItemId::from("A.5.1")),
        StatusValue::Managed
    );
}
