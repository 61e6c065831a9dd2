use crate::shared::error::ArkitectoError;
use crate::shared::AppResult;
use serde::{Deserialize, Serialize};

/// Provenance tag used for lines entered by hand rather than priced from the APU catalog
pub const MANUAL_APU_ORIGIN: &str = "manual";

/// Maximum length for an item label (keeps exports and share messages readable)
const MAX_ELEMENTO_LENGTH: usize = 200;

/// A single priced line of a construction budget.
///
/// `subtotal` is always derived from `cantidad * precio_unitario` when the
/// item is built locally. Items decoded from the server are taken as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    elemento: String,
    #[serde(default)]
    descripcion: String,
    cantidad: f64,
    unidad: String,
    precio_unitario: f64,
    subtotal: f64,
    #[serde(default)]
    apu_origen: String,
}

impl BudgetItem {
    pub fn elemento(&self) -> &str {
        &self.elemento
    }

    pub fn descripcion(&self) -> &str {
        &self.descripcion
    }

    pub fn cantidad(&self) -> f64 {
        self.cantidad
    }

    pub fn unidad(&self) -> &str {
        &self.unidad
    }

    pub fn precio_unitario(&self) -> f64 {
        self.precio_unitario
    }

    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }

    /// Identifier of the APU catalog entry that priced this line
    pub fn apu_origen(&self) -> &str {
        &self.apu_origen
    }
}

/// Input of the manual add-item flow.
///
/// There is deliberately no subtotal field: it is computed by [`NewBudgetItem::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudgetItem {
    pub elemento: String,
    pub descripcion: String,
    pub cantidad: f64,
    pub unidad: String,
    pub precio_unitario: f64,
    pub apu_origen: Option<String>,
}

impl NewBudgetItem {
    /// Validates the form values and builds the item with its derived subtotal.
    ///
    /// # Errors
    /// Returns [`ArkitectoError::Validation`] when a required field is blank or
    /// a numeric value is negative or not finite.
    pub fn build(self) -> AppResult<BudgetItem> {
        let elemento = self.elemento.trim().to_string();
        if elemento.is_empty() {
            return Err(ArkitectoError::validation("elemento", "must not be empty"));
        }
        if elemento.len() > MAX_ELEMENTO_LENGTH {
            return Err(ArkitectoError::validation(
                "elemento",
                format!(
                    "is too long ({} bytes). Maximum allowed: {} bytes",
                    elemento.len(),
                    MAX_ELEMENTO_LENGTH
                ),
            ));
        }

        let unidad = self.unidad.trim().to_string();
        if unidad.is_empty() {
            return Err(ArkitectoError::validation("unidad", "must not be empty"));
        }

        validate_amount("cantidad", self.cantidad)?;
        validate_amount("precio_unitario", self.precio_unitario)?;

        let apu_origen = self
            .apu_origen
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .unwrap_or_else(|| MANUAL_APU_ORIGIN.to_string());

        Ok(BudgetItem {
            elemento,
            descripcion: self.descripcion.trim().to_string(),
            cantidad: self.cantidad,
            unidad,
            precio_unitario: self.precio_unitario,
            subtotal: self.cantidad * self.precio_unitario,
            apu_origen,
        })
    }
}

fn validate_amount(field: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() {
        return Err(ArkitectoError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ArkitectoError::validation(field, "must not be negative"));
    }
    Ok(())
}
