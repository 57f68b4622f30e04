//! Form session use cases.
//!
//! A [`FormSession`] owns the values document for one open character sheet.
//! Every edit replaces the document with a new copy-on-write version; the
//! template stays fixed unless [`FormSession::change_schema`] swaps it.
//!
//! The working document is the plain nested form (no `value` wrappers).
//! Loading converts from the persisted wrapped form, saving converts back.

mod error;

pub use error::SessionError;

use std::collections::HashMap;

use sheetsmith_domain::forms::{
    circle_path, marked_circles, push_item, toggle_circle, ItemShape,
};
use sheetsmith_domain::{
    as_number, collapse, deduct_status, expand, find_missing_required, flatten, get, initialize,
    item_shape, missing_required_fields, normalize, normalize_collection, parse_number,
    pruned_paths, remove, remove_item, reorder, set, unflatten, DomainError, FieldDefinition,
    FieldKind, MissingField, Schema, SheetValue, StatusRegistry,
};

use crate::config::EngineConfig;

/// One open character sheet: its template, its values and the status
/// registry derived from the template.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: Schema,
    values: SheetValue,
    status: StatusRegistry,
    /// User-chosen `statuscusto` targets, by cost field path
    status_targets: HashMap<String, String>,
    warn_on_prune: bool,
}

impl FormSession {
    /// Start a blank sheet for a template.
    pub fn new(schema: Schema, config: &EngineConfig) -> Self {
        let values = initialize(&schema);
        let status = StatusRegistry::from_schema(&schema);

        tracing::info!(
            fields = schema.len(),
            status_fields = status.paths().len(),
            "Started blank sheet"
        );

        Self {
            schema,
            values,
            status,
            status_targets: HashMap::new(),
            warn_on_prune: config.warn_on_prune,
        }
    }

    /// Open a persisted sheet: flatten the wrapped document, rebuild the
    /// plain nested form and normalize it against the template.
    pub fn load(schema: Schema, wrapped: &SheetValue, config: &EngineConfig) -> Self {
        let flat = flatten(wrapped);
        let plain = expand(&flat);
        let mut session = Self {
            values: SheetValue::empty_object(),
            status: StatusRegistry::from_schema(&schema),
            schema,
            status_targets: HashMap::new(),
            warn_on_prune: config.warn_on_prune,
        };
        session.values = session.reconcile(&plain);

        tracing::info!(
            stored_paths = flat.len(),
            fields = session.schema.len(),
            "Loaded sheet"
        );

        session
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn values(&self) -> &SheetValue {
        &self.values
    }

    /// Every status leaf the template declares.
    pub fn status_paths(&self) -> &[String] {
        self.status.paths()
    }

    pub fn get(&self, path: &str) -> Option<&SheetValue> {
        get(&self.values, path)
    }

    pub fn set_field(&mut self, path: &str, value: SheetValue) {
        tracing::debug!(path = %path, "Set field");
        self.values = set(&self.values, path, value);
    }

    /// Store numeric user input. Unparsable input is stored as 0.
    pub fn set_number_input(&mut self, path: &str, input: &str) -> SheetValue {
        let value = parse_number(input);
        tracing::debug!(path = %path, input = %input, "Set numeric field");
        self.values = set(&self.values, path, value.clone());
        value
    }

    pub fn remove_field(&mut self, path: &str) {
        tracing::debug!(path = %path, "Removed field");
        self.values = remove(&self.values, path);
    }

    /// Switch to another template, keeping the values it still declares.
    /// Returns the paths that were dropped.
    pub fn change_schema(&mut self, schema: Schema) -> Vec<String> {
        let pruned = pruned_paths(&self.values, &schema);
        self.schema = schema;
        self.status = StatusRegistry::from_schema(&self.schema);
        self.values = self.reconcile(&self.values);

        let schema = &self.schema;
        let status = &self.status;
        self.status_targets.retain(|cost_path, target| {
            matches!(
                schema.field_at(cost_path).map(|field| &field.kind),
                Some(FieldKind::StatusCusto { .. })
            ) && status.contains(target)
        });

        tracing::info!(
            fields = self.schema.len(),
            pruned = pruned.len(),
            "Changed sheet template"
        );
        pruned
    }

    /// Display names of the required fields still blank.
    pub fn missing_required(&self) -> Vec<String> {
        find_missing_required(&self.values, &self.schema)
    }

    pub fn missing_required_fields(&self) -> Vec<MissingField> {
        missing_required_fields(&self.values, &self.schema)
    }

    /// Validate and produce the wrapped document to persist.
    pub fn submit(&self) -> Result<SheetValue, SessionError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            tracing::info!(missing = ?missing, "Submission blocked by required fields");
            return Err(SessionError::MissingRequired(missing));
        }

        let wrapped = self.to_wrapped();
        tracing::info!("Sheet ready to persist");
        Ok(wrapped)
    }

    /// The working document in the persisted wrapped form.
    pub fn to_wrapped(&self) -> SheetValue {
        unflatten(&collapse(&self.values))
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Current rows of a `list`/`objectlist` field, shaped.
    pub fn rows(&self, path: &str) -> Result<Vec<SheetValue>, SessionError> {
        let field = collection_field(&self.schema, path)?;
        Ok(current_rows(&self.values, path, field).0)
    }

    /// Append a blank row. Returns the new row count.
    pub fn add_row(&mut self, path: &str) -> Result<usize, SessionError> {
        let field = collection_field(&self.schema, path)?;
        let (rows, shape) = current_rows(&self.values, path, field);
        let rows = push_item(&rows, shape.empty_item());
        let len = rows.len();
        self.values = set(&self.values, path, SheetValue::list(rows));

        tracing::debug!(path = %path, rows = len, "Added row");
        Ok(len)
    }

    pub fn remove_row(&mut self, path: &str, index: usize) -> Result<(), SessionError> {
        let field = collection_field(&self.schema, path)?;
        let (rows, _) = current_rows(&self.values, path, field);
        check_index(path, index, rows.len())?;
        self.values = set(&self.values, path, SheetValue::list(remove_item(&rows, index)));

        tracing::debug!(path = %path, index, "Removed row");
        Ok(())
    }

    /// Drag-and-drop reorder.
    pub fn move_row(&mut self, path: &str, from: usize, to: usize) -> Result<(), SessionError> {
        let field = collection_field(&self.schema, path)?;
        let (rows, _) = current_rows(&self.values, path, field);
        check_index(path, from, rows.len())?;
        check_index(path, to, rows.len())?;
        self.values = set(&self.values, path, SheetValue::list(reorder(&rows, from, to)));

        tracing::debug!(path = %path, from, to, "Moved row");
        Ok(())
    }

    // =========================================================================
    // Pseudo-leaves
    // =========================================================================

    /// Target of a `statuscusto` field: the user's choice, else the
    /// template's.
    pub fn status_target(&self, path: &str) -> Result<Option<String>, SessionError> {
        match &known_field(&self.schema, path)?.kind {
            FieldKind::StatusCusto { status_target } => Ok(self
                .status_targets
                .get(path)
                .cloned()
                .or_else(|| status_target.clone())),
            _ => Err(DomainError::wrong_kind(path, "statuscusto").into()),
        }
    }

    /// Point a `statuscusto` field at another registered status leaf.
    pub fn set_status_target(
        &mut self,
        path: &str,
        target: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.status_target(path)?;
        let target = target.into();
        if !self.status.contains(&target) {
            return Err(DomainError::unknown_status_target(target).into());
        }

        tracing::debug!(path = %path, target = %target, "Retargeted status cost");
        self.status_targets.insert(path.to_string(), target);
        Ok(())
    }

    /// Deduct a `statuscusto` field's value from its target status. Returns
    /// the status value after the deduction.
    pub fn apply_status_cost(&mut self, path: &str) -> Result<SheetValue, SessionError> {
        let target = self
            .status_target(path)?
            .ok_or_else(|| DomainError::missing_status_target(path))?;
        let amount = self.get(path).map(as_number).unwrap_or_default();
        self.values = deduct_status(&self.values, &target, amount, &self.status)?;
        let remaining = self.get(&target).cloned().unwrap_or_default();

        tracing::info!(
            path = %path,
            target = %target,
            amount,
            "Applied status cost"
        );
        Ok(remaining)
    }

    /// Flip one circle of a `dadovida` field. Returns the circle's new state.
    pub fn toggle_circle(&mut self, path: &str, index: u32) -> Result<bool, SessionError> {
        let quantity = dice_quantity(&self.schema, path)?;
        if index >= quantity {
            return Err(
                DomainError::index_out_of_range(path, index as usize, quantity as usize).into(),
            );
        }
        self.values = toggle_circle(&self.values, path, index);
        let marked = self
            .get(&circle_path(path, index))
            .and_then(SheetValue::as_bool)
            .unwrap_or_default();

        tracing::debug!(path = %path, index, marked, "Toggled circle");
        Ok(marked)
    }

    /// Number of marked circles of a `dadovida` field.
    pub fn marked_circles(&self, path: &str) -> Result<usize, SessionError> {
        let quantity = dice_quantity(&self.schema, path)?;
        Ok(marked_circles(&self.values, path, quantity))
    }

    fn reconcile(&self, values: &SheetValue) -> SheetValue {
        if self.warn_on_prune {
            let pruned = pruned_paths(values, &self.schema);
            if !pruned.is_empty() {
                tracing::warn!(
                    pruned = ?pruned,
                    "Dropping values the template no longer declares"
                );
            }
        }
        normalize(values, &self.schema)
    }
}

fn known_field<'a>(schema: &'a Schema, path: &str) -> Result<&'a FieldDefinition, DomainError> {
    schema
        .field_at(path)
        .ok_or_else(|| DomainError::unknown_field(path))
}

fn collection_field<'a>(
    schema: &'a Schema,
    path: &str,
) -> Result<&'a FieldDefinition, DomainError> {
    let field = known_field(schema, path)?;
    if !field.is_collection() {
        tracing::warn!(path = %path, kind = field.kind.kind_name(), "Rejected row edit");
        return Err(DomainError::wrong_kind(path, "collection"));
    }
    Ok(field)
}

fn dice_quantity(schema: &Schema, path: &str) -> Result<u32, DomainError> {
    match known_field(schema, path)?.kind {
        FieldKind::DadoVida { quantity } => Ok(quantity),
        _ => Err(DomainError::wrong_kind(path, "dadovida")),
    }
}

fn current_rows(
    values: &SheetValue,
    path: &str,
    field: &FieldDefinition,
) -> (Vec<SheetValue>, ItemShape) {
    let current = get(values, path).cloned().unwrap_or_default();
    let rows = normalize_collection(&current, field)
        .as_list()
        .map(|rows| rows.to_vec())
        .unwrap_or_default();
    let shape = item_shape(field, &rows).unwrap_or(ItemShape::Scalar { choices: None });
    (rows, shape)
}

fn check_index(path: &str, index: usize, len: usize) -> Result<(), DomainError> {
    if index < len {
        Ok(())
    } else {
        Err(DomainError::index_out_of_range(path, index, len))
    }
}
