//! Objects shared by many methods.

kbase_type! {
    /// A file handle: a local path on the service side and/or a Shock node id.
    pub struct File {
        /// Path of the file as seen by the service.
        path: String,
        /// Shock node holding the file contents.
        shock_id: String,
    }
}

kbase_type! {
    /// Reference to a workspace object created by an import.
    pub struct WorkspaceRef {
        /// `workspace/object[/version]` reference.
        #[serde(rename = "ref")]
        reference: String,
    }
}

kbase_type! {
    /// Selects the workspace object to export.
    pub struct ExportParams {
        /// Reference of the object to export.
        input_ref: String,
    }
}

kbase_type! {
    /// Location of an exported archive.
    pub struct ExportOutput {
        /// Shock node holding the export.
        shock_id: String,
    }
}

kbase_type! {
    /// Exports many objects at once, optionally every object of a kind in a workspace.
    pub struct BulkExportObjectsParams {
        refs: Vec<String>,
        all_models: i64,
        all_fba: i64,
        all_media: i64,
        all_phenotypes: i64,
        all_phenosims: i64,
        model_format: String,
        fba_format: String,
        media_format: String,
        phenotype_format: String,
        phenosim_format: String,
        workspace: String,
        report_workspace: String,
    }
}

kbase_type! {
    /// Report produced by a bulk export.
    pub struct BulkExportObjectsResult {
        report_name: String,
        report_ref: String,
    }
}

kbase_type! {
    /// Answer of the `status` method.
    pub struct ServiceStatus {
        /// `OK` when the service is healthy.
        state: String,
        message: String,
        version: String,
        git_url: String,
        git_commit_hash: String,
    }
}

impl File {
    /// A handle naming a service-side path.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self { path: Some(path.into()), ..Default::default() }
    }

    /// A handle naming a Shock node.
    pub fn from_shock_id(shock_id: impl Into<String>) -> Self {
        Self { shock_id: Some(shock_id.into()), ..Default::default() }
    }
}

impl ExportParams {
    /// Export params for the object at `input_ref`.
    pub fn for_ref(input_ref: impl Into<String>) -> Self {
        Self { input_ref: Some(input_ref.into()), ..Default::default() }
    }
}

impl ServiceStatus {
    /// Whether the service reported itself healthy.
    pub fn is_ok(&self) -> bool { self.state.as_deref() == Some("OK") }
}
