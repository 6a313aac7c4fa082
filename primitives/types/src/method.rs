//! The `fba_tools` method catalogue.
//!
//! Every remote method takes at most one parameter object and returns one
//! value. The catalogue records, per method, the wire name, the parameter
//! name used by the service, the Rust parameter and result types, the
//! parameter shape and a coarse category.
//!
//! The list itself lives in [`for_each_method!`](crate::for_each_method) so
//! the typed client can be generated from the same source.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the remote service; prefixes every qualified method name.
pub const SERVICE_NAME: &str = "fba_tools";

/// Invokes `$callback!` with one entry per parameterised method.
///
/// Each entry has the form
/// `(Variant, wire_name, param_name, ParamType, ResultType, Shape, Category)`
/// preceded by its doc attributes. `status`, which takes no parameter, is
/// not part of the list.
#[macro_export]
macro_rules! for_each_method {
    ($callback:ident) => {
        $callback! {
            /// Build a genome-scale metabolic model based on annotations in an input genome.
            (BuildMetabolicModel, build_metabolic_model, params, BuildMetabolicModelParams, BuildMetabolicModelResults, Config, Reconstruction),
            /// Build a genome-scale plant metabolic model based on annotations in an input genome.
            (BuildPlantMetabolicModel, build_plant_metabolic_model, params, BuildPlantMetabolicModelParams, BuildPlantMetabolicModelResults, Config, Reconstruction),
            /// Build one metabolic model per input genome.
            (BuildMultipleMetabolicModels, build_multiple_metabolic_models, params, BuildMultipleMetabolicModelsParams, BuildMultipleMetabolicModelsResults, Config, Reconstruction),
            /// Gapfill a metabolic model to induce flux in a specified reaction.
            (GapfillMetabolicModel, gapfill_metabolic_model, params, GapfillMetabolicModelParams, GapfillMetabolicModelResults, Config, Reconstruction),
            /// Run flux balance analysis and return the reference of the FBA object holding the results.
            (RunFluxBalanceAnalysis, run_flux_balance_analysis, params, RunFluxBalanceAnalysisParams, RunFluxBalanceAnalysisResults, Config, Analysis),
            /// Compare multiple FBA solutions and save the comparison as a new workspace object.
            (CompareFbaSolutions, compare_fba_solutions, params, CompareFbaSolutionsParams, CompareFbaSolutionsResults, Config, Analysis),
            /// Translate the model of one organism to another using a protein comparison between their genomes.
            (PropagateModelToNewGenome, propagate_model_to_new_genome, params, PropagateModelToNewGenomeParams, PropagateModelToNewGenomeResults, Config, Reconstruction),
            /// Simulate multiple growth phenotypes with FBA.
            (SimulateGrowthOnPhenotypeData, simulate_growth_on_phenotype_data, params, SimulateGrowthOnPhenotypeDataParams, SimulateGrowthOnPhenotypeDataResults, Config, Analysis),
            /// Merge two or more models into a compartmentalized community model.
            (MergeMetabolicModelsIntoCommunityModel, merge_metabolic_models_into_community_model, params, MergeMetabolicModelsIntoCommunityModelParams, MergeMetabolicModelsIntoCommunityModelResults, Config, Reconstruction),
            /// Render the flux network of an FBA solution as a report.
            (ViewFluxNetwork, view_flux_network, params, ViewFluxNetworkParams, ViewFluxNetworkResults, Config, Analysis),
            /// Compare predicted fluxes with gene expression data.
            (CompareFluxWithExpression, compare_flux_with_expression, params, CompareFluxWithExpressionParams, CompareFluxWithExpressionResults, Config, Analysis),
            /// Identify reactions in a model that are not mass balanced.
            (CheckModelMassBalance, check_model_mass_balance, params, CheckModelMassBalanceParams, CheckModelMassBalanceResults, Config, Analysis),
            /// Predict auxotrophies for a set of genomes.
            (PredictAuxotrophy, predict_auxotrophy, params, PredictAuxotrophyParams, PredictAuxotrophyResults, Config, Analysis),
            /// Predict the biosynthesis pathways of target metabolites.
            (PredictMetaboliteBiosynthesisPathway, predict_metabolite_biosynthesis_pathway, params, PredictMetaboliteBiosynthesisPathwayInput, PredictMetaboliteBiosynthesisPathwayResults, Config, Analysis),
            /// Build a metabolic model from a metagenome annotation.
            (BuildMetagenomeMetabolicModel, build_metagenome_metabolic_model, params, BuildMetagenomeMetabolicModelParams, BuildMetabolicModelResults, Config, Reconstruction),
            /// Gapfill a metabolic model to fit exometabolite data.
            (FitExometaboliteData, fit_exometabolite_data, params, FitExometaboliteDataParams, FitExometaboliteDataResults, Config, Reconstruction),
            /// Compare a set of models.
            (CompareModels, compare_models, params, ModelComparisonParams, ModelComparisonResult, Config, Analysis),
            /// Edit the compounds, biomass and reactions of a model.
            (EditMetabolicModel, edit_metabolic_model, params, EditMetabolicModelParams, EditMetabolicModelResult, Config, Editing),
            /// Edit the compounds and conditions of a media.
            (EditMedia, edit_media, params, EditMediaParams, EditMediaResult, Config, Editing),
            /// Import a model from an Excel file.
            (ExcelFileToModel, excel_file_to_model, p, ModelCreationParams, WorkspaceRef, FileReference, Import),
            /// Import a model from an SBML file.
            (SbmlFileToModel, sbml_file_to_model, p, ModelCreationParams, WorkspaceRef, FileReference, Import),
            /// Import a model from TSV files.
            (TsvFileToModel, tsv_file_to_model, p, ModelCreationParams, WorkspaceRef, FileReference, Import),
            /// Write a model to an Excel file.
            (ModelToExcelFile, model_to_excel_file, model, ModelObjectSelectionParams, File, ObjectSelection, Export),
            /// Write a model to an SBML file.
            (ModelToSbmlFile, model_to_sbml_file, model, ModelObjectSelectionParams, File, ObjectSelection, Export),
            /// Write a model to compound and reaction TSV files.
            (ModelToTsvFile, model_to_tsv_file, model, ModelObjectSelectionParams, ModelTsvFiles, ObjectSelection, Export),
            /// Export a model as an Excel file stored in Shock.
            (ExportModelAsExcelFile, export_model_as_excel_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Export a model as TSV files stored in Shock.
            (ExportModelAsTsvFile, export_model_as_tsv_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Export a model as an SBML file stored in Shock.
            (ExportModelAsSbmlFile, export_model_as_sbml_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Write an FBA solution to an Excel file.
            (FbaToExcelFile, fba_to_excel_file, fba, FbaObjectSelectionParams, File, ObjectSelection, Export),
            /// Write an FBA solution to compound and reaction TSV files.
            (FbaToTsvFile, fba_to_tsv_file, fba, FbaObjectSelectionParams, FbaTsvFiles, ObjectSelection, Export),
            /// Export an FBA solution as an Excel file stored in Shock.
            (ExportFbaAsExcelFile, export_fba_as_excel_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Export an FBA solution as TSV files stored in Shock.
            (ExportFbaAsTsvFile, export_fba_as_tsv_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Import a media from a TSV file.
            (TsvFileToMedia, tsv_file_to_media, p, MediaCreationParams, WorkspaceRef, FileReference, Import),
            /// Import a media from an Excel file.
            (ExcelFileToMedia, excel_file_to_media, p, MediaCreationParams, WorkspaceRef, FileReference, Import),
            /// Write a media to a TSV file.
            (MediaToTsvFile, media_to_tsv_file, media, MediaObjectSelectionParams, File, ObjectSelection, Export),
            /// Write a media to an Excel file.
            (MediaToExcelFile, media_to_excel_file, media, MediaObjectSelectionParams, File, ObjectSelection, Export),
            /// Export a media as an Excel file stored in Shock.
            (ExportMediaAsExcelFile, export_media_as_excel_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Export a media as a TSV file stored in Shock.
            (ExportMediaAsTsvFile, export_media_as_tsv_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Import a phenotype set from a TSV file.
            (TsvFileToPhenotypeSet, tsv_file_to_phenotype_set, p, PhenotypeSetCreationParams, WorkspaceRef, FileReference, Import),
            /// Write a phenotype set to a TSV file.
            (PhenotypeSetToTsvFile, phenotype_set_to_tsv_file, phenotype_set, PhenotypeSetObjectSelectionParams, File, ObjectSelection, Export),
            /// Export a phenotype set as a TSV file stored in Shock.
            (ExportPhenotypeSetAsTsvFile, export_phenotype_set_as_tsv_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Write a phenotype simulation set to an Excel file.
            (PhenotypeSimulationSetToExcelFile, phenotype_simulation_set_to_excel_file, pss, PhenotypeSimulationSetObjectSelectionParams, File, ObjectSelection, Export),
            /// Write a phenotype simulation set to a TSV file.
            (PhenotypeSimulationSetToTsvFile, phenotype_simulation_set_to_tsv_file, pss, PhenotypeSimulationSetObjectSelectionParams, File, ObjectSelection, Export),
            /// Export a phenotype simulation set as an Excel file stored in Shock.
            (ExportPhenotypeSimulationSetAsExcelFile, export_phenotype_simulation_set_as_excel_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Export a phenotype simulation set as a TSV file stored in Shock.
            (ExportPhenotypeSimulationSetAsTsvFile, export_phenotype_simulation_set_as_tsv_file, params, ExportParams, ExportOutput, ExportReference, Export),
            /// Export many workspace objects in the requested formats at once.
            (BulkExportObjects, bulk_export_objects, params, BulkExportObjectsParams, BulkExportObjectsResult, Config, Bulk),
        }
    };
}

/// The shape of the single parameter a method accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamShape {
    /// A configuration object describing the analysis to run.
    Config,
    /// Creation params embedding one or more [`File`](crate::File) references.
    FileReference,
    /// A workspace object selection (workspace + object name).
    ObjectSelection,
    /// An [`ExportParams`](crate::ExportParams) object reference.
    ExportReference,
    /// The method takes no parameter.
    None,
}

/// Coarse grouping of the catalogue, used for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodCategory {
    /// Model reconstruction and gapfilling.
    Reconstruction,
    /// Flux analysis and comparisons.
    Analysis,
    /// In-place edits of models and media.
    Editing,
    /// File to workspace object conversions.
    Import,
    /// Workspace object to file conversions.
    Export,
    /// Multi-object operations.
    Bulk,
    /// Service metadata.
    Service,
}

impl MethodCategory {
    /// Canonical display name used for sorting and headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            MethodCategory::Reconstruction => "reconstruction",
            MethodCategory::Analysis => "analysis",
            MethodCategory::Editing => "editing",
            MethodCategory::Import => "import",
            MethodCategory::Export => "export",
            MethodCategory::Bulk => "bulk",
            MethodCategory::Service => "service",
        }
    }
}

impl fmt::Display for MethodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.display_name()) }
}

/// Metadata for a catalogue entry.
#[derive(Debug)]
struct MethodMetadata {
    name: &'static str,
    qualified_name: &'static str,
    param_name: Option<&'static str>,
    param_type: Option<&'static str>,
    result_type: &'static str,
    shape: ParamShape,
    category: MethodCategory,
}

macro_rules! define_methods {
    ($(
        $(#[$doc:meta])*
        ($variant:ident, $name:ident, $param:ident, $ptype:ident, $rtype:ident, $shape:ident, $category:ident)
    ),* $(,)?) => {
        /// Every remote method of the `fba_tools` service.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Method {
            $( $(#[$doc])* $variant, )*
            /// Report the service state, version and source revision.
            Status,
        }

        impl Method {
            /// All methods, in catalogue order.
            pub const ALL: &'static [Method] = &[ $( Method::$variant, )* Method::Status ];

            fn metadata(&self) -> &'static MethodMetadata {
                match self {
                    $(
                        Method::$variant => &MethodMetadata {
                            name: stringify!($name),
                            qualified_name: concat!("fba_tools.", stringify!($name)),
                            param_name: Some(stringify!($param)),
                            param_type: Some(stringify!($ptype)),
                            result_type: stringify!($rtype),
                            shape: ParamShape::$shape,
                            category: MethodCategory::$category,
                        },
                    )*
                    Method::Status => &MethodMetadata {
                        name: "status",
                        qualified_name: "fba_tools.status",
                        param_name: None,
                        param_type: None,
                        result_type: "ServiceStatus",
                        shape: ParamShape::None,
                        category: MethodCategory::Service,
                    },
                }
            }
        }
    };
}

for_each_method!(define_methods);

impl Method {
    /// Wire name without the service prefix, e.g. `run_flux_balance_analysis`.
    pub fn name(&self) -> &'static str { self.metadata().name }

    /// Wire name with the service prefix, e.g. `fba_tools.run_flux_balance_analysis`.
    pub fn qualified_name(&self) -> &'static str { self.metadata().qualified_name }

    /// The service-side name of the parameter, if the method takes one.
    pub fn param_name(&self) -> Option<&'static str> { self.metadata().param_name }

    /// The Rust type name of the parameter, if the method takes one.
    pub fn param_type(&self) -> Option<&'static str> { self.metadata().param_type }

    /// The Rust type name of the returned value.
    pub fn result_type(&self) -> &'static str { self.metadata().result_type }

    /// Shape of the parameter.
    pub fn shape(&self) -> ParamShape { self.metadata().shape }

    /// Category used for listing.
    pub fn category(&self) -> MethodCategory { self.metadata().category }

    /// Number of positional arguments the method accepts (0 or 1).
    pub fn arity(&self) -> usize { usize::from(self.metadata().param_name.is_some()) }

    /// Number of values the method returns. Every `fba_tools` method returns one.
    pub fn return_count(&self) -> usize { 1 }
}

impl FromStr for Method {
    type Err = String;

    /// Accepts the bare wire name or the `fba_tools.`-qualified name.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bare = s.strip_prefix("fba_tools.").unwrap_or(s);
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.name() == bare)
            .ok_or_else(|| format!("Unknown method name: {}", s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}
