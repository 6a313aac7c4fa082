//! Reconstruction, gapfilling and flux analysis.
//!
//! Boolean options are integer flags (see [`flag`](crate::flag)). Lists of
//! knockouts, custom bounds and media supplements are plain id strings.

kbase_type! {
    /// Builds a draft model from an annotated genome, optionally gapfilling it.
    pub struct BuildMetabolicModelParams {
        genome_id: String,
        genome_workspace: String,
        media_id: String,
        media_workspace: String,
        fbamodel_output_id: String,
        workspace: String,
        template_id: String,
        template_workspace: String,
        coremodel: i64,
        gapfill_model: i64,
        thermodynamic_constraints: i64,
        comprehensive_gapfill: i64,
        custom_bound_list: Vec<String>,
        media_supplement_list: Vec<String>,
        expseries_id: String,
        expseries_workspace: String,
        expression_condition: String,
        exp_threshold_percentile: f64,
        exp_threshold_margin: f64,
        activation_coefficient: f64,
        omega: f64,
        objective_fraction: f64,
        minimum_target_flux: f64,
        number_of_solutions: i64,
    }
}

kbase_type! {
    /// Outcome of a model build, also returned by metagenome reconstruction.
    pub struct BuildMetabolicModelResults {
        new_fbamodel_ref: String,
        new_fba_ref: String,
        number_gapfilled_reactions: i64,
        number_removed_biomass_compounds: i64,
    }
}

kbase_type! {
    pub struct BuildPlantMetabolicModelParams {
        genome_id: String,
        genome_workspace: String,
        fbamodel_output_id: String,
        workspace: String,
        template_id: String,
        template_workspace: String,
    }
}

kbase_type! {
    pub struct BuildPlantMetabolicModelResults {
        new_fbamodel_ref: String,
    }
}

kbase_type! {
    /// Builds one model per genome; genomes come from `genome_ids` and/or
    /// newline-separated `genome_text`.
    pub struct BuildMultipleMetabolicModelsParams {
        genome_ids: Vec<String>,
        genome_text: String,
        genome_workspace: String,
        media_id: String,
        media_workspace: String,
        fbamodel_output_id: String,
        workspace: String,
        template_id: String,
        template_workspace: String,
        coremodel: i64,
        gapfill_model: i64,
        thermodynamic_constraints: i64,
        comprehensive_gapfill: i64,
        custom_bound_list: Vec<String>,
        media_supplement_list: Vec<String>,
        expseries_id: String,
        expseries_workspace: String,
        expression_condition: String,
        exp_threshold_percentile: f64,
        exp_threshold_margin: f64,
        activation_coefficient: f64,
        omega: f64,
        objective_fraction: f64,
        minimum_target_flux: f64,
        number_of_solutions: i64,
    }
}

kbase_type! {
    pub struct BuildMultipleMetabolicModelsResults {
        new_fbamodel_ref: String,
        new_fba_ref: String,
    }
}

kbase_type! {
    /// Gapfills a model so that it can produce biomass (or `target_reaction`)
    /// on the given media.
    pub struct GapfillMetabolicModelParams {
        fbamodel_id: String,
        fbamodel_workspace: String,
        media_id: String,
        media_workspace: String,
        target_reaction: String,
        fbamodel_output_id: String,
        workspace: String,
        thermodynamic_constraints: i64,
        comprehensive_gapfill: i64,
        source_fbamodel_id: String,
        source_fbamodel_workspace: String,
        feature_ko_list: Vec<String>,
        reaction_ko_list: Vec<String>,
        custom_bound_list: Vec<String>,
        media_supplement_list: Vec<String>,
        expseries_id: String,
        expseries_workspace: String,
        expression_condition: String,
        exp_threshold_percentile: f64,
        exp_threshold_margin: f64,
        activation_coefficient: f64,
        omega: f64,
        objective_fraction: f64,
        minimum_target_flux: f64,
        number_of_solutions: i64,
    }
}

kbase_type! {
    pub struct GapfillMetabolicModelResults {
        new_fbamodel_ref: String,
        new_fba_ref: String,
        number_gapfilled_reactions: i64,
        number_removed_biomass_compounds: i64,
    }
}

kbase_type! {
    /// Runs flux balance analysis on a model and media.
    ///
    /// The `max_*_uptake` bounds limit uptake of carbon, nitrogen,
    /// phosphate, sulfur and oxygen respectively.
    pub struct RunFluxBalanceAnalysisParams {
        fbamodel_id: String,
        fbamodel_workspace: String,
        media_id: String,
        media_workspace: String,
        target_reaction: String,
        fba_output_id: String,
        workspace: String,
        thermodynamic_constraints: i64,
        fva: i64,
        minimize_flux: i64,
        simulate_ko: i64,
        find_min_media: i64,
        all_reversible: i64,
        feature_ko_list: Vec<String>,
        reaction_ko_list: Vec<String>,
        custom_bound_list: Vec<String>,
        media_supplement_list: Vec<String>,
        expseries_id: String,
        expseries_workspace: String,
        exp_condition: String,
        exp_threshold_percentile: f64,
        exp_threshold_margin: f64,
        activation_coefficient: f64,
        omega: f64,
        objective_fraction: f64,
        max_c_uptake: f64,
        max_n_uptake: f64,
        max_p_uptake: f64,
        max_s_uptake: f64,
        max_o_uptake: f64,
        default_max_uptake: f64,
        notes: String,
        massbalance: String,
    }
}

kbase_type! {
    pub struct RunFluxBalanceAnalysisResults {
        new_fba_ref: String,
        objective: i64,
    }
}

kbase_type! {
    pub struct CompareFbaSolutionsParams {
        fba_id_list: Vec<String>,
        fba_workspace: String,
        fbacomparison_output_id: String,
        workspace: String,
    }
}

kbase_type! {
    pub struct CompareFbaSolutionsResults {
        new_fbacomparison_ref: String,
    }
}

kbase_type! {
    /// Translates a model onto a new genome through a protein comparison.
    pub struct PropagateModelToNewGenomeParams {
        fbamodel_id: String,
        fbamodel_workspace: String,
        proteincomparison_id: String,
        proteincomparison_workspace: String,
        fbamodel_output_id: String,
        workspace: String,
        keep_nogene_rxn: i64,
        gapfill_model: i64,
        media_id: String,
        media_workspace: String,
        thermodynamic_constraints: i64,
        comprehensive_gapfill: i64,
        custom_bound_list: Vec<String>,
        media_supplement_list: Vec<String>,
        expseries_id: String,
        expseries_workspace: String,
        expression_condition: String,
        translation_policy: String,
        exp_threshold_percentile: f64,
        exp_threshold_margin: f64,
        activation_coefficient: f64,
        omega: f64,
        objective_fraction: f64,
        minimum_target_flux: f64,
        number_of_solutions: i64,
    }
}

kbase_type! {
    pub struct PropagateModelToNewGenomeResults {
        new_fbamodel_ref: String,
        new_fba_ref: String,
        number_gapfilled_reactions: i64,
        number_removed_biomass_compounds: i64,
    }
}

kbase_type! {
    pub struct SimulateGrowthOnPhenotypeDataParams {
        fbamodel_id: String,
        fbamodel_workspace: String,
        phenotypeset_id: String,
        phenotypeset_workspace: String,
        phenotypesim_output_id: String,
        workspace: String,
        all_reversible: i64,
        feature_ko_list: Vec<String>,
        reaction_ko_list: Vec<String>,
        custom_bound_list: Vec<String>,
        media_supplement_list: Vec<String>,
    }
}

kbase_type! {
    pub struct SimulateGrowthOnPhenotypeDataResults {
        new_phenotypesim_ref: String,
    }
}

kbase_type! {
    /// Merges several models into one community model.
    pub struct MergeMetabolicModelsIntoCommunityModelParams {
        fbamodel_id_list: Vec<String>,
        fbamodel_workspace: String,
        fbamodel_output_id: String,
        workspace: String,
        mixed_bag_model: i64,
    }
}

kbase_type! {
    pub struct MergeMetabolicModelsIntoCommunityModelResults {
        new_fbamodel_ref: String,
    }
}

kbase_type! {
    pub struct ViewFluxNetworkParams {
        fba_id: String,
        fba_workspace: String,
        workspace: String,
    }
}

kbase_type! {
    pub struct ViewFluxNetworkResults {
        new_report_ref: String,
    }
}

kbase_type! {
    pub struct CompareFluxWithExpressionParams {
        fba_id: String,
        expseries_id: String,
        expression_condition: String,
        exp_threshold_percentile: f64,
        estimate_threshold: i64,
        maximize_agreement: i64,
        fbapathwayanalysis_output_id: String,
    }
}

kbase_type! {
    pub struct CompareFluxWithExpressionResults {
        new_fbapathwayanalysis_ref: String,
    }
}

kbase_type! {
    pub struct CheckModelMassBalanceParams {
        fbamodel_id: String,
        fbamodel_workspace: String,
        workspace: String,
    }
}

kbase_type! {
    pub struct CheckModelMassBalanceResults {
        new_report_ref: String,
    }
}

kbase_type! {
    pub struct PredictAuxotrophyParams {
        genome_ids: Vec<String>,
        genome_workspace: String,
        workspace: String,
    }
}

kbase_type! {
    pub struct PredictAuxotrophyResults {
        new_report_ref: String,
    }
}

kbase_type! {
    /// Predicts the pathway from source metabolites to target metabolites.
    pub struct PredictMetaboliteBiosynthesisPathwayInput {
        fbamodel_id: String,
        fbamodel_workspace: String,
        media_id: String,
        media_workspace: String,
        target_metabolite_list: Vec<String>,
        source_metabolite_list: Vec<String>,
        fba_output_id: String,
        workspace: String,
        thermodynamic_constraints: i64,
        feature_ko_list: Vec<String>,
        reaction_ko_list: Vec<String>,
        expseries_id: String,
        expseries_workspace: String,
        expression_condition: String,
        exp_threshold_percentile: f64,
        exp_threshold_margin: f64,
        activation_coefficient: f64,
        omega: f64,
    }
}

kbase_type! {
    pub struct PredictMetaboliteBiosynthesisPathwayResults {
        new_fba_ref: String,
    }
}

kbase_type! {
    /// Builds a model from a metagenome assembly.
    pub struct BuildMetagenomeMetabolicModelParams {
        input_ref: String,
        input_workspace: String,
        media_id: String,
        media_workspace: String,
        fbamodel_output_id: String,
        workspace: String,
        gapfill_model: i64,
    }
}

kbase_type! {
    /// Fits a model to observed exometabolite data.
    pub struct FitExometaboliteDataParams {
        fbamodel_id: String,
        fbamodel_workspace: String,
        source_fbamodel_id: String,
        source_fbamodel_workspace: String,
        media_id: String,
        media_workspace: String,
        metabolome_id: String,
        metabolome_workspace: String,
        metabolome_condition: String,
        fbamodel_output_id: String,
        workspace: String,
        minimum_target_flux: f64,
        omnidirectional: i64,
        target_reaction: String,
        feature_ko_list: Vec<String>,
        reaction_ko_list: Vec<String>,
        media_supplement_list: Vec<String>,
    }
}

kbase_type! {
    pub struct FitExometaboliteDataResults {
        new_fbamodel_ref: String,
        new_fba_ref: String,
        number_gapfilled_reactions: i64,
    }
}

kbase_type! {
    /// Compares models, optionally through a protein comparison or pangenome.
    pub struct ModelComparisonParams {
        workspace: String,
        mc_name: String,
        model_refs: Vec<String>,
        protcomp_ref: String,
        pangenome_ref: String,
    }
}

kbase_type! {
    pub struct ModelComparisonResult {
        report_name: String,
        report_ref: String,
        mc_ref: String,
    }
}

impl RunFluxBalanceAnalysisParams {
    /// Flux balance analysis of `fbamodel_id` on `media_id`, saved as
    /// `fba_output_id` in `workspace`.
    pub fn new(
        fbamodel_id: impl Into<String>,
        media_id: impl Into<String>,
        fba_output_id: impl Into<String>,
        workspace: impl Into<String>,
    ) -> Self {
        Self {
            fbamodel_id: Some(fbamodel_id.into()),
            media_id: Some(media_id.into()),
            fba_output_id: Some(fba_output_id.into()),
            workspace: Some(workspace.into()),
            ..Default::default()
        }
    }
}

impl GapfillMetabolicModelParams {
    /// Gapfills `fbamodel_id` on `media_id`, saved as `fbamodel_output_id`
    /// in `workspace`.
    pub fn new(
        fbamodel_id: impl Into<String>,
        media_id: impl Into<String>,
        fbamodel_output_id: impl Into<String>,
        workspace: impl Into<String>,
    ) -> Self {
        Self {
            fbamodel_id: Some(fbamodel_id.into()),
            media_id: Some(media_id.into()),
            fbamodel_output_id: Some(fbamodel_output_id.into()),
            workspace: Some(workspace.into()),
            ..Default::default()
        }
    }
}
