//! Inputs of an aggregation run.

use mirador_model::{
    AggregationOptions, PanelReference, PatientStore, SequencingData, VariableDictionary,
};

/// Everything the aggregation engine reads, gathered once the loaders are done.
#[derive(Debug, Clone, Default)]
pub struct AggregationContext {
    pub store: PatientStore,
    pub demographics: VariableDictionary,
    pub case_notification: VariableDictionary,
    pub panel_reference: PanelReference,
    /// Present only when sequencing data was loaded.
    pub sequencing: Option<SequencingData>,
    pub options: AggregationOptions,
}

impl AggregationContext {
    pub fn new(store: PatientStore, options: AggregationOptions) -> Self {
        Self {
            store,
            options,
            ..Self::default()
        }
    }

    pub fn with_demographics(mut self, dictionary: VariableDictionary) -> Self {
        self.demographics = dictionary;
        self
    }

    pub fn with_case_notification(mut self, dictionary: VariableDictionary) -> Self {
        self.case_notification = dictionary;
        self
    }

    pub fn with_panel_reference(mut self, reference: PanelReference) -> Self {
        self.panel_reference = reference;
        self
    }

    pub fn with_sequencing(mut self, sequencing: SequencingData) -> Self {
        self.sequencing = Some(sequencing);
        self
    }

    /// Sequencing data to merge, if enabled and loaded.
    pub fn active_sequencing(&self) -> Option<&SequencingData> {
        if self.options.include_sequencing {
            self.sequencing.as_ref()
        } else {
            None
        }
    }
}
