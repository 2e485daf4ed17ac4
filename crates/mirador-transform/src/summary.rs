//! Cohort counts reported after loading.

use mirador_model::{DiseaseGroup, Outcome, PatientRecord, PatientStore};

/// Counts split by sex as recorded in demographics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SexBreakdown {
    pub female: usize,
    pub male: usize,
    pub unknown: usize,
}

impl SexBreakdown {
    fn count(&mut self, record: &PatientRecord) {
        match record.sex.as_deref() {
            Some("Female") => self.female += 1,
            Some("Male") => self.male += 1,
            _ => self.unknown += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CohortSummary {
    pub total: usize,
    pub positive: usize,
    pub positive_by_sex: SexBreakdown,
    /// Positive cases with a recorded outcome; the counts below refine this set.
    pub known_outcome: usize,
    pub with_viral_load: usize,
    pub with_case_notification: usize,
    pub positive_with_panel: usize,
    pub no_viral_load_fatal: usize,
    pub no_viral_load_non_fatal: usize,
    pub negative: usize,
    pub negative_by_sex: SexBreakdown,
    pub negative_with_panel: usize,
}

impl CohortSummary {
    pub fn from_store(store: &PatientStore) -> Self {
        let mut summary = Self {
            total: store.len(),
            ..Self::default()
        };
        for record in store.iter() {
            match record.group {
                DiseaseGroup::Positive => summary.count_positive(record),
                DiseaseGroup::Negative => {
                    summary.negative += 1;
                    summary.negative_by_sex.count(record);
                    if !record.panels.is_empty() {
                        summary.negative_with_panel += 1;
                    }
                }
            }
        }
        summary
    }

    fn count_positive(&mut self, record: &PatientRecord) {
        self.positive += 1;
        self.positive_by_sex.count(record);
        let Some(outcome) = record.outcome else {
            return;
        };
        self.known_outcome += 1;
        if record.case_notification.is_some() {
            self.with_case_notification += 1;
        }
        if !record.panels.is_empty() {
            self.positive_with_panel += 1;
        }
        if record.has_viral_load() {
            self.with_viral_load += 1;
        } else {
            match outcome {
                Outcome::Died => self.no_viral_load_fatal += 1,
                Outcome::Discharged => self.no_viral_load_non_fatal += 1,
                Outcome::Unknown => {}
            }
        }
    }

    /// `(depth, label, count)` lines in report order.
    pub fn lines(&self) -> Vec<(usize, &'static str, usize)> {
        vec![
            (0, "Cases evaluated", self.total),
            (1, "Positive cases", self.positive),
            (2, "female", self.positive_by_sex.female),
            (2, "male", self.positive_by_sex.male),
            (2, "unknown sex", self.positive_by_sex.unknown),
            (2, "with known outcome", self.known_outcome),
            (3, "with viral load (qPCR)", self.with_viral_load),
            (3, "with clinical chart", self.with_case_notification),
            (3, "with metabolic panel", self.positive_with_panel),
            (3, "no viral load, fatal", self.no_viral_load_fatal),
            (3, "no viral load, non fatal", self.no_viral_load_non_fatal),
            (1, "Negative cases", self.negative),
            (2, "female", self.negative_by_sex.female),
            (2, "male", self.negative_by_sex.male),
            (2, "unknown sex", self.negative_by_sex.unknown),
            (2, "with metabolic panel", self.negative_with_panel),
        ]
    }
}
