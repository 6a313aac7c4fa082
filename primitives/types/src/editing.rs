//! In-place edits of metabolic models and media.

use std::collections::BTreeMap;

/// A media compound row: `(compound_id, concentration, min_flux, max_flux)`.
pub type MediaCompound = (String, f64, f64, f64);

/// One row of a model edit table, keyed by column name.
pub type EditRow = BTreeMap<String, String>;

kbase_type! {
    /// Edits a media formulation and saves it under `media_output_id`.
    pub struct EditMediaParams {
        workspace: String,
        media_id: String,
        media_workspace: String,
        compounds_to_remove: Vec<String>,
        compounds_to_change: Vec<MediaCompound>,
        compounds_to_add: Vec<MediaCompound>,
        #[serde(rename = "pH_data")]
        ph_data: String,
        temperature: f64,
        #[serde(rename = "isDefined")]
        is_defined: i64,
        #[serde(rename = "type")]
        media_type: String,
        media_output_id: String,
    }
}

kbase_type! {
    pub struct EditMediaResult {
        report_name: String,
        report_ref: String,
        new_media_id: String,
    }
}

kbase_type! {
    /// Edits compounds, reactions and biomass of a model.
    ///
    /// Each list holds table rows as produced by the service's edit UI.
    pub struct EditMetabolicModelParams {
        workspace: String,
        fbamodel_workspace: String,
        fbamodel_id: String,
        fbamodel_output_id: String,
        compounds_to_add: Vec<EditRow>,
        compounds_to_change: Vec<EditRow>,
        biomasses_to_add: Vec<EditRow>,
        biomass_compounds_to_change: Vec<EditRow>,
        reactions_to_remove: Vec<EditRow>,
        reactions_to_change: Vec<EditRow>,
        reactions_to_add: Vec<EditRow>,
        edit_compound_stoichiometry: Vec<EditRow>,
    }
}

kbase_type! {
    pub struct EditMetabolicModelResult {
        report_name: String,
        report_ref: String,
        new_fbamodel_ref: String,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_edit_media_wire_names() {
        let params = EditMediaParams {
            media_id: Some("Carbon-D-Glucose".to_string()),
            compounds_to_add: Some(vec![("cpd00027".to_string(), 5.0, -100.0, 100.0)]),
            ph_data: Some("7".to_string()),
            is_defined: Some(1),
            media_type: Some("custom".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&params).expect("encodes");
        assert_eq!(
            value,
            json!({
                "media_id": "Carbon-D-Glucose",
                "compounds_to_add": [["cpd00027", 5.0, -100.0, 100.0]],
                "pH_data": "7",
                "isDefined": 1,
                "type": "custom"
            })
        );

        let back: EditMediaParams = serde_json::from_value(value).expect("decodes");
        assert_eq!(back, params);
    }

    #[test]
    fn test_edit_model_rows() {
        let mut row = EditRow::new();
        row.insert("reaction_id".to_string(), "rxn00001_c0".to_string());

        let params = EditMetabolicModelParams {
            fbamodel_id: Some("model".to_string()),
            reactions_to_remove: Some(vec![row]),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&params).expect("encodes"),
            json!({
                "fbamodel_id": "model",
                "reactions_to_remove": [{"reaction_id": "rxn00001_c0"}]
            })
        );
    }
}
