//! Parameters for moving models, FBA solutions, media and phenotype sets
//! between files and workspace objects.

use crate::File;

kbase_type! {
    /// Creates a model object from an SBML, Excel or TSV upload.
    ///
    /// `biomass` lists the ids of the reactions to treat as biomass;
    /// `compounds_file` is only consulted for the TSV format.
    pub struct ModelCreationParams {
        model_file: File,
        model_name: String,
        workspace_name: String,
        genome: String,
        biomass: Vec<String>,
        compounds_file: File,
    }
}

kbase_type! {
    /// Selects a model object to convert to a file.
    pub struct ModelObjectSelectionParams {
        workspace_name: String,
        model_name: String,
        save_to_shock: i64,
        /// Include the full biochemistry database in the output.
        fulldb: i64,
    }
}

kbase_type! {
    /// Selects an FBA solution object to convert to a file.
    pub struct FbaObjectSelectionParams {
        workspace_name: String,
        fba_name: String,
        save_to_shock: i64,
    }
}

kbase_type! {
    /// Creates a media object from an upload.
    pub struct MediaCreationParams {
        media_file: File,
        media_name: String,
        workspace_name: String,
    }
}

kbase_type! {
    /// Selects a media object to convert to a file.
    pub struct MediaObjectSelectionParams {
        workspace_name: String,
        media_name: String,
        save_to_shock: i64,
    }
}

kbase_type! {
    /// Creates a phenotype set object from an upload.
    pub struct PhenotypeSetCreationParams {
        phenotype_set_file: File,
        phenotype_set_name: String,
        workspace_name: String,
        genome: String,
    }
}

kbase_type! {
    /// Selects a phenotype set object to convert to a file.
    pub struct PhenotypeSetObjectSelectionParams {
        workspace_name: String,
        phenotype_set_name: String,
        save_to_shock: i64,
    }
}

kbase_type! {
    /// Selects a phenotype simulation set object to convert to a file.
    pub struct PhenotypeSimulationSetObjectSelectionParams {
        workspace_name: String,
        phenotype_simulation_set_name: String,
        save_to_shock: i64,
    }
}

kbase_type! {
    /// The two tables a model is written to in TSV format.
    pub struct ModelTsvFiles {
        compounds_file: File,
        reactions_file: File,
    }
}

kbase_type! {
    /// The two tables an FBA solution is written to in TSV format.
    pub struct FbaTsvFiles {
        compounds_file: File,
        reactions_file: File,
    }
}

impl ModelObjectSelectionParams {
    /// Selects `model_name` in `workspace_name`.
    pub fn new(workspace_name: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            workspace_name: Some(workspace_name.into()),
            model_name: Some(model_name.into()),
            ..Default::default()
        }
    }
}

impl FbaObjectSelectionParams {
    /// Selects `fba_name` in `workspace_name`.
    pub fn new(workspace_name: impl Into<String>, fba_name: impl Into<String>) -> Self {
        Self {
            workspace_name: Some(workspace_name.into()),
            fba_name: Some(fba_name.into()),
            ..Default::default()
        }
    }
}

impl MediaObjectSelectionParams {
    /// Selects `media_name` in `workspace_name`.
    pub fn new(workspace_name: impl Into<String>, media_name: impl Into<String>) -> Self {
        Self {
            workspace_name: Some(workspace_name.into()),
            media_name: Some(media_name.into()),
            ..Default::default()
        }
    }
}
