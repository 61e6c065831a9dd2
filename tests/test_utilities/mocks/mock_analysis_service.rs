use arkitecto::ports::outbound::{
    AnalysisPayload, ExportData, HealthStatus, SketchPayload, SuggestionsPayload,
};
use arkitecto::prelude::*;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Mock of the public analysis service: analysis, renders and exports
///
/// Every call is recorded as `"<endpoint>"` in `calls`.
#[derive(Clone)]
pub struct MockAnalysisService {
    analysis: Value,
    sketch: Value,
    suggestions: Value,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub last_instruction: Arc<Mutex<Option<String>>>,
    pub last_export: Arc<Mutex<Option<ExportData>>>,
}

impl MockAnalysisService {
    pub fn new() -> Self {
        Self {
            analysis: json!({
                "success": true,
                "analisis": "Muro de albañilería de 10 m2 sobre radier existente.",
                "presupuesto": {
                    "items": [
                        {
                            "elemento": "Muro de albañilería",
                            "descripcion": "Ladrillo fiscal",
                            "cantidad": 10.0,
                            "unidad": "m2",
                            "precio_unitario": 18990.0,
                            "subtotal": 189900.0,
                            "apu_origen": "APU-101"
                        },
                        {
                            "elemento": "Estuco",
                            "cantidad": 10.0,
                            "unidad": "m2",
                            "precio_unitario": 6000.0,
                            "subtotal": 60000.0
                        }
                    ],
                    "total_estimado": 249900.0,
                    "moneda": "CLP",
                    "total_con_iva": 297381.0
                },
                "metadata": { "categoria": "obra gruesa" }
            }),
            sketch: json!({
                "success": true,
                "generated_image": "data:image/png;base64,iVBORw0KGgo="
            }),
            suggestions: json!({
                "success": true,
                "suggestions": [
                    {
                        "titulo": "Baño completo",
                        "descripcion": "Remodelación de baño",
                        "query": "remodelación baño completo",
                        "area_tipica": 6,
                        "icono": "bath"
                    },
                    {
                        "titulo": "Cierre perimetral",
                        "descripcion": "Muro de albañilería",
                        "query": "cierre perimetral de albañilería",
                        "metros_lineales": 40,
                        "icono": "fence"
                    }
                ]
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
            last_instruction: Arc::new(Mutex::new(None)),
            last_export: Arc::new(Mutex::new(None)),
        }
    }

    /// Replaces the analysis response body
    pub fn with_analysis(mut self, analysis: Value) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn record_export(&self, call: &str, data: &ExportData) {
        self.record(call);
        *self.last_export.lock().unwrap() = Some(data.clone());
    }

    fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> ApiResult<T> {
        serde_json::from_value(value.clone()).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }
}

impl Default for MockAnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisGateway for MockAnalysisService {
    async fn analyze_budget(&self, image: &ImageUpload, instruction: &str) -> ApiResult<AnalysisPayload> {
        *self.last_instruction.lock().unwrap() = Some(instruction.to_string());
        self.record(if image.is_placeholder() {
            "analyze_budget:placeholder"
        } else {
            "analyze_budget:photo"
        });
        Self::decode(&self.analysis)
    }

    async fn generate_sketch(&self, _image: Option<&ImageUpload>, _prompt: &str) -> ApiResult<SketchPayload> {
        self.record("generate_sketch");
        Self::decode(&self.sketch)
    }

    async fn check_health(&self) -> ApiResult<HealthStatus> {
        self.record("health");
        Ok(HealthStatus {
            status: "online".to_string(),
            brain: Some("gemini".to_string()),
        })
    }

    async fn suggestions(&self) -> ApiResult<SuggestionsPayload> {
        self.record("suggestions");
        Self::decode(&self.suggestions)
    }
}

#[async_trait]
impl ExportGateway for MockAnalysisService {
    async fn export_pdf(&self, data: &ExportData) -> ApiResult<Vec<u8>> {
        self.record_export("export_pdf", data);
        Ok(b"%PDF-1.4 mock".to_vec())
    }

    async fn export_excel(&self, data: &ExportData) -> ApiResult<Vec<u8>> {
        self.record_export("export_excel", data);
        Ok(b"PK\x03\x04 mock".to_vec())
    }

    async fn export_text(&self, data: &ExportData) -> ApiResult<String> {
        self.record_export("export_text", data);
        Ok(format!("PRESUPUESTO: {} partidas", data.presupuesto.items.len()))
    }
}
