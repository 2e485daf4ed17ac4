use std::collections::HashMap;

use mirador_model::{
    AggregationOptions, ClusterAssignment, CodeMap, DictionaryEntry, DiseaseGroup, Outcome,
    PanelReading, PanelReference, PatientStore, QpcrReading, SequencingData, SiteValues,
    SourceRow, VariableDictionary, VariableType,
};
use mirador_transform::{AggregateError, AggregationContext, CohortSummary, aggregate};
use proptest::prelude::*;

fn reading(idx: usize, value: &str) -> QpcrReading {
    QpcrReading {
        sample_index: idx.to_string(),
        date: format!("2014-06-{:02}", idx),
        value: value.to_string(),
    }
}

fn sex_dictionary() -> VariableDictionary {
    VariableDictionary::new(vec![DictionaryEntry {
        position: 3,
        name: "SEX".to_string(),
        alias: "Sex".to_string(),
        group: "Demographics".to_string(),
        table: "Basic Information".to_string(),
        var_type: VariableType::Category,
        range_spec: Some("1:Male;0:Female".to_string()),
        codes: Some(CodeMap::parse("1:Male;0:Female").expect("codes")),
    }])
}

fn demographics_row(sex: &str) -> SourceRow {
    SourceRow::new(vec![
        "1".to_string(),
        "EP123".to_string(),
        "30".to_string(),
        sex.to_string(),
    ])
}

fn panel_reference() -> PanelReference {
    PanelReference::new(vec![mirador_model::AnalyteInfo {
        name: "ALB".to_string(),
        title: "Albumin [g/dL]".to_string(),
        female_range: "3.3-5.5".parse().expect("range"),
        male_range: "3.3-5.5".parse().expect("range"),
        column: 7,
    }])
}

#[test]
fn positive_patient_without_viral_load() {
    let mut store = PatientStore::new();
    let record = store.get_or_insert("EP123", DiseaseGroup::Positive);
    record.sex = Some("Male".to_string());
    record.demographics = Some(demographics_row("Male"));

    let ctx = AggregationContext::new(store, AggregationOptions::default())
        .with_demographics(sex_dictionary());
    let dataset = aggregate(&ctx).expect("aggregate");

    assert_eq!(dataset.value("EP123", "GID"), Some("EP123"));
    assert_eq!(dataset.value("EP123", "DIAG"), Some("1"));
    assert_eq!(dataset.value("EP123", "SEX"), Some("1"));
    for name in ["PCR", "PCR_MAX", "PCR_MIN", "PCR_AVE"] {
        assert_eq!(dataset.value("EP123", name), Some(""), "{name}");
    }
    let names: Vec<&str> = dataset.catalog().names().collect();
    assert_eq!(
        names,
        vec!["GID", "DIAG", "SEX", "PCR", "PCR_MAX", "PCR_MIN", "PCR_AVE"]
    );
}

#[test]
fn linear_viral_load_statistics() {
    let mut store = PatientStore::new();
    let record = store.get_or_insert("G-1", DiseaseGroup::Positive);
    record.qpcr = vec![reading(1, "1000"), reading(2, "4000")];

    let ctx = AggregationContext::new(store, AggregationOptions::default());
    let dataset = aggregate(&ctx).expect("aggregate");

    assert_eq!(dataset.value("G-1", "PCR"), Some("1000"));
    assert_eq!(dataset.value("G-1", "PCR_MAX"), Some("4000"));
    assert_eq!(dataset.value("G-1", "PCR_MIN"), Some("1000"));
    assert_eq!(dataset.value("G-1", "PCR_AVE"), Some("2500"));
    assert_eq!(dataset.value("G-1", "DOPCR_2"), Some("2014-06-02"));
    assert_eq!(dataset.value("G-1", "PCR_2"), Some("4000"));
}

#[test]
fn log_mode_transforms_before_aggregating() {
    let mut store = PatientStore::new();
    let record = store.get_or_insert("G-1", DiseaseGroup::Positive);
    record.qpcr = vec![reading(1, "99"), reading(2, ""), reading(3, "9999")];

    let options = AggregationOptions::default().with_log_viral_load(true);
    let ctx = AggregationContext::new(store, options);
    let dataset = aggregate(&ctx).expect("aggregate");

    assert_eq!(dataset.value("G-1", "PCR"), Some("2"));
    assert_eq!(dataset.value("G-1", "PCR_MAX"), Some("4"));
    assert_eq!(dataset.value("G-1", "PCR_MIN"), Some("2"));
    assert_eq!(dataset.value("G-1", "PCR_AVE"), Some("3"));
    assert_eq!(dataset.value("G-1", "PCR_2"), Some(""));
    assert_eq!(dataset.value("G-1", "PCR_3"), Some("4"));

    let pcr = dataset.catalog().get("PCR").expect("PCR");
    assert_eq!(pcr.title, "First measured viral load (log units)");
    let slot = dataset.catalog().get("PCR_1").expect("PCR_1");
    assert_eq!(slot.title, "EBOV copies/mL plasma (log units) day 1");
}

#[test]
fn non_numeric_reading_is_missing() {
    let mut store = PatientStore::new();
    let record = store.get_or_insert("G-1", DiseaseGroup::Positive);
    record.qpcr = vec![reading(1, "pending"), reading(2, "50")];

    let ctx = AggregationContext::new(store, AggregationOptions::default());
    let dataset = aggregate(&ctx).expect("aggregate");
    assert_eq!(dataset.value("G-1", "PCR"), Some("50"));
    assert_eq!(dataset.value("G-1", "PCR_1"), Some(""));
    assert_eq!(dataset.value("G-1", "DOPCR_1"), Some("2014-06-01"));
}

#[test]
fn series_are_padded_to_the_longest() {
    let mut store = PatientStore::new();
    let long = store.get_or_insert("G-1", DiseaseGroup::Positive);
    long.qpcr = vec![reading(1, "10"), reading(2, "20"), reading(3, "30")];
    long.panels = vec![
        PanelReading {
            date: "2014-06-01".to_string(),
            values: vec!["4.1".to_string()],
        },
        PanelReading {
            date: "2014-06-02".to_string(),
            values: vec!["3.9".to_string()],
        },
    ];
    let short = store.get_or_insert("G-2", DiseaseGroup::Negative);
    short.qpcr = vec![reading(1, "")];

    let ctx = AggregationContext::new(store, AggregationOptions::default())
        .with_panel_reference(panel_reference());
    let dataset = aggregate(&ctx).expect("aggregate");

    let width = dataset.variables().len();
    assert!(dataset.rows().iter().all(|row| row.cells.len() == width));
    assert_eq!(dataset.value("G-1", "ALB_2"), Some("3.9"));
    assert_eq!(dataset.value("G-2", "DOPANEL_1"), Some(""));
    assert_eq!(dataset.value("G-2", "DOPCR_1"), Some("2014-06-01"));
    assert_eq!(dataset.value("G-2", "PCR_3"), Some(""));
    assert_eq!(dataset.value("G-2", "DIAG"), Some("0"));

    let table = &dataset.catalog().get("ALB_1").expect("ALB_1");
    assert_eq!(table.title, "Albumin [g/dL] day 1");
    assert_eq!(table.table, "Metabolic Panel Day 1");
}

#[test]
fn unmapped_category_values_are_dropped() {
    let mut store = PatientStore::new();
    store
        .get_or_insert("EP123", DiseaseGroup::Positive)
        .demographics = Some(demographics_row("M"));
    store.get_or_insert("EP124", DiseaseGroup::Positive);

    let ctx = AggregationContext::new(store, AggregationOptions::default())
        .with_demographics(sex_dictionary());
    let dataset = aggregate(&ctx).expect("aggregate");
    assert_eq!(dataset.value("EP123", "SEX"), Some(""));
    assert_eq!(dataset.value("EP124", "SEX"), Some(""));
}

#[test]
fn sequencing_columns_only_when_enabled() {
    let mut store = PatientStore::new();
    store.get_or_insert("G-3686", DiseaseGroup::Positive);
    store.get_or_insert("G-1", DiseaseGroup::Positive);

    let mut snp = SiteValues::snp(10218);
    snp.values.insert("G-3686".to_string(), "1".to_string());
    let mut af = SiteValues::allele_frequency(10218);
    af.values.insert("G-3686".to_string(), "0.88".to_string());
    af.values.insert("G-9999".to_string(), "0.5".to_string());
    let sequencing = SequencingData {
        snps: vec![snp],
        allele_frequencies: vec![af],
        clusters: HashMap::from([("G-3686".to_string(), ClusterAssignment::parse("2.13"))]),
    };

    let disabled = AggregationContext::new(store.clone(), AggregationOptions::default())
        .with_sequencing(sequencing.clone());
    assert!(aggregate(&disabled).expect("aggregate").catalog().get("CLUST").is_none());

    let enabled = AggregationContext::new(store, AggregationOptions::default().with_sequencing(true))
        .with_sequencing(sequencing);
    let dataset = aggregate(&enabled).expect("aggregate");
    assert_eq!(dataset.value("G-3686", "SNP10218"), Some("1"));
    assert_eq!(dataset.value("G-3686", "AF10218"), Some("0.88"));
    assert_eq!(dataset.value("G-3686", "CLUST"), Some("2"));
    assert_eq!(dataset.value("G-3686", "MCLUST"), Some("1"));
    assert_eq!(dataset.value("G-3686", "SCLUST"), Some("3"));
    assert_eq!(dataset.value("G-3686", "MSCLUST"), Some("0"));
    assert_eq!(dataset.value("G-1", "SNP10218"), Some(""));
    assert_eq!(dataset.value("G-1", "CLUST"), Some(""));
    assert!(dataset.row("G-9999").is_none());

    let clust = dataset.catalog().get("SCLUST").expect("SCLUST");
    assert_eq!(clust.range_spec, "1:Sub-cluster a;2:Sub-cluster b;3:Sub-cluster c");
    assert_eq!(dataset.catalog().get("MSCLUST").map(|v| v.var_type), Some(VariableType::Int));
}

fn category_entry(position: usize, name: &str, alias: &str, spec: &str) -> DictionaryEntry {
    DictionaryEntry {
        position,
        name: name.to_string(),
        alias: alias.to_string(),
        group: "Demographics".to_string(),
        table: "Basic Information".to_string(),
        var_type: VariableType::Category,
        range_spec: Some(spec.to_string()),
        codes: Some(CodeMap::parse(spec).expect("codes")),
    }
}

#[test]
fn dictionary_columns_follow_file_order() {
    let mut store = PatientStore::new();
    let record = store.get_or_insert("EP123", DiseaseGroup::Positive);
    record.demographics = Some(SourceRow::new(
        ["1", "EP123", "30", "Female", "", "", "", "Died"]
            .iter()
            .map(|cell| (*cell).to_string())
            .collect(),
    ));
    let dictionary = VariableDictionary::new(vec![
        category_entry(7, "OUT", "Outcome", "1:Died;0:Discharged"),
        category_entry(3, "SEX", "Sex", "1:Male;0:Female"),
    ]);
    let ctx = AggregationContext::new(store, AggregationOptions::default())
        .with_demographics(dictionary);
    let dataset = aggregate(&ctx).expect("aggregate");

    let names: Vec<&str> = dataset.catalog().names().take(4).collect();
    assert_eq!(names, vec!["GID", "DIAG", "OUT", "SEX"]);
    assert_eq!(dataset.value("EP123", "OUT"), Some("1"));
    assert_eq!(dataset.value("EP123", "SEX"), Some("0"));
}

#[test]
fn patient_id_keeps_its_dictionary_spelling() {
    let mut store = PatientStore::new();
    store.get_or_insert("G-1", DiseaseGroup::Negative);
    let ctx = AggregationContext::new(store, AggregationOptions::default());
    let dataset = aggregate(&ctx).expect("aggregate");
    let gid = dataset.catalog().get("GID").expect("GID");
    assert_eq!(gid.var_type, VariableType::String);
    assert_eq!(gid.type_label(), "String");
    let diag = dataset.catalog().get("DIAG").expect("DIAG");
    assert_eq!(diag.type_label(), "category");
}

#[test]
fn duplicate_variable_names_fail() {
    let mut store = PatientStore::new();
    store.get_or_insert("G-1", DiseaseGroup::Positive);
    let dictionary = VariableDictionary::new(vec![DictionaryEntry {
        position: 2,
        name: "PCR".to_string(),
        alias: "Clash".to_string(),
        group: "Clinical".to_string(),
        table: "Signs".to_string(),
        var_type: VariableType::String,
        range_spec: None,
        codes: None,
    }]);
    let ctx = AggregationContext::new(store, AggregationOptions::default())
        .with_case_notification(dictionary);
    assert!(matches!(
        aggregate(&ctx),
        Err(AggregateError::DuplicateVariable { name }) if name == "PCR"
    ));
}

#[test]
fn frame_matches_rows() {
    let mut store = PatientStore::new();
    store.get_or_insert("G-1", DiseaseGroup::Positive).qpcr = vec![reading(1, "10")];
    store.get_or_insert("G-2", DiseaseGroup::Negative);
    let ctx = AggregationContext::new(store, AggregationOptions::default());
    let dataset = aggregate(&ctx).expect("aggregate");
    let frame = dataset.to_frame().expect("frame");
    assert_eq!(frame.record_count(), 2);
    assert_eq!(frame.column_names()[0], "GID");
    assert_eq!(frame.row_values(1), dataset.rows()[1].cells);
}

#[test]
fn summary_counts_positive_outcomes() {
    let mut store = PatientStore::new();
    let died = store.get_or_insert("G-1", DiseaseGroup::Positive);
    died.outcome = Some(Outcome::Died);
    died.sex = Some("Female".to_string());
    died.qpcr = vec![reading(1, "")];
    let discharged = store.get_or_insert("G-2", DiseaseGroup::Positive);
    discharged.outcome = Some(Outcome::Discharged);
    discharged.qpcr = vec![reading(1, "10")];
    store.get_or_insert("G-3", DiseaseGroup::Negative).sex = Some("Male".to_string());

    let summary = CohortSummary::from_store(&store);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.positive, 2);
    assert_eq!(summary.positive_by_sex.female, 1);
    assert_eq!(summary.positive_by_sex.unknown, 1);
    assert_eq!(summary.known_outcome, 2);
    assert_eq!(summary.with_viral_load, 1);
    assert_eq!(summary.no_viral_load_fatal, 1);
    assert_eq!(summary.negative_by_sex.male, 1);
    assert_eq!(summary.lines().len(), 16);
}

proptest! {
    #[test]
    fn log_minimum_is_minimum_of_logs(values in prop::collection::vec(0u32..1_000_000, 1..8)) {
        let mut store = PatientStore::new();
        store.get_or_insert("G-1", DiseaseGroup::Positive).qpcr = values
            .iter()
            .enumerate()
            .map(|(idx, v)| reading(idx + 1, &v.to_string()))
            .collect();
        let options = AggregationOptions::default().with_log_viral_load(true);
        let dataset = aggregate(&AggregationContext::new(store, options)).expect("aggregate");

        let expected = values
            .iter()
            .map(|&v| (1.0 + f64::from(v)).log10())
            .fold(f64::INFINITY, f64::min);
        let min: f64 = dataset.value("G-1", "PCR_MIN").expect("PCR_MIN").parse().expect("number");
        prop_assert_eq!(min, expected);
    }

    #[test]
    fn every_row_has_full_width(lengths in prop::collection::vec(0usize..5, 1..6)) {
        let mut store = PatientStore::new();
        for (idx, &len) in lengths.iter().enumerate() {
            let record = store.get_or_insert(&format!("G-{idx}"), DiseaseGroup::Positive);
            record.qpcr = (1..=len).map(|slot| reading(slot, "5")).collect();
        }
        let max = lengths.iter().copied().max().unwrap_or(0);
        let dataset = aggregate(&AggregationContext::new(store, AggregationOptions::default()))
            .expect("aggregate");

        prop_assert_eq!(dataset.variables().len(), 2 + 4 + 2 * max);
        for (row, &len) in dataset.rows().iter().zip(&lengths) {
            prop_assert_eq!(row.cells.len(), dataset.variables().len());
            let slots = &row.cells[6..];
            for (slot, pair) in slots.chunks(2).enumerate() {
                if slot < len {
                    prop_assert_eq!(pair[1].as_str(), "5");
                } else {
                    prop_assert!(pair.iter().all(String::is_empty));
                }
            }
        }
    }
}
