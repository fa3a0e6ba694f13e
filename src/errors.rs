use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Por favor, selecciona tanto la fecha de inicio como la fecha de fin.")]
    MissingDate,
    #[error("Fecha no válida: {0}. Usa el formato AAAA-MM-DD.")]
    InvalidDate(String),
    #[error("La fecha de inicio no puede ser posterior a la fecha de fin.")]
    StartAfterEnd,
    #[error("{message}")]
    Service { status: StatusCode, message: String },
    #[error("No se pudieron cargar las comisiones: {0}")]
    Transport(String),
}

impl ReportError {
    pub fn service(status: StatusCode, message: Option<String>) -> Self {
        let message = message
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Error en la solicitud: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
                .trim_end()
                .to_string()
            });
        Self::Service { status, message }
    }

    /// Keeps the whole `source()` chain so the root cause reaches the page.
    pub fn transport(err: impl std::error::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self::Transport(message)
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.without_url())
    }
}
