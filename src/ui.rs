use crate::models::{CommissionReport, DateInputs, RequestState};

pub const BUTTON_IDLE: &str = "Calcular Comisiones";
pub const BUTTON_LOADING: &str = "Calculando...";
pub const LOADING_MESSAGE: &str = "Cargando comisiones...";
pub const NO_RESULTS_MESSAGE: &str =
    "No se encontraron comisiones para el rango de fechas seleccionado.";
const CURRENCY: &str = "$";

pub fn render_index(inputs: &DateInputs, state: &RequestState) -> String {
    let disabled = if state.is_loading() { " disabled" } else { "" };
    let loading = render_results(&RequestState::Loading);
    let results = render_results(state);
    let fecha_inicio = escape_html(&inputs.fecha_inicio);
    let fecha_fin = escape_html(&inputs.fecha_fin);

    fill_template(INDEX_HTML, |key| match key {
        "DISABLED" => Some(disabled),
        "BUTTON_LABEL" => Some(button_label(state)),
        "BUTTON_IDLE" => Some(BUTTON_IDLE),
        "BUTTON_LOADING" => Some(BUTTON_LOADING),
        "LOADING_HTML" => Some(loading.as_str()),
        "RESULTS" => Some(results.as_str()),
        "FECHA_INICIO" => Some(fecha_inicio.as_str()),
        "FECHA_FIN" => Some(fecha_fin.as_str()),
        _ => None,
    })
}

/// Substitutes `{{KEY}}` placeholders in one pass; inserted values are
/// never scanned again.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}").and_then(|close| Some((close, lookup(&after[..close])?))) {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn button_label(state: &RequestState) -> &'static str {
    if state.is_loading() {
        BUTTON_LOADING
    } else {
        BUTTON_IDLE
    }
}

/// Contents of the results region for a given state.
pub fn render_results(state: &RequestState) -> String {
    match state {
        RequestState::Idle => String::new(),
        RequestState::Loading => {
            format!(r#"<p class="loading-message" role="status">{LOADING_MESSAGE}</p>"#)
        }
        RequestState::Error { message } => format!(
            r#"<p class="error-message" role="alert">{}</p>"#,
            escape_html(message)
        ),
        RequestState::Loaded { report } if report.is_empty() => {
            format!(r#"<p class="no-results-message">{NO_RESULTS_MESSAGE}</p>"#)
        }
        RequestState::Loaded { report } => render_table(report),
    }
}

fn render_table(report: &CommissionReport) -> String {
    let rows: String = report
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&entry.name),
                format_amount(entry.total_sales),
                format_amount(entry.commission)
            )
        })
        .collect();

    format!(
        r#"<table id="tablaComisiones">
  <thead>
    <tr><th>Vendedor</th><th>Total Ventas</th><th>Comisión Calculada</th></tr>
  </thead>
  <tbody>{rows}</tbody>
</table>"#
    )
}

pub fn format_amount(value: f64) -> String {
    format!("{CURRENCY}{value:.2}")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calcular Comisiones</title>
  <style>
    body {
      margin: 0;
      font-family: "Trebuchet MS", sans-serif;
      background: #f4f6f8;
      color: #2b2a28;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .container {
      width: min(760px, 100%);
      background: white;
      border-radius: 16px;
      box-shadow: 0 16px 40px rgba(47, 72, 88, 0.14);
      padding: 32px;
      display: grid;
      gap: 18px;
    }

    .input-group {
      display: grid;
      gap: 6px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      background: #2f4858;
      color: white;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 8px 10px;
      border-bottom: 1px solid #e3e6ea;
    }

    .error-message {
      color: #c63b2b;
    }

    .no-results-message, .loading-message {
      color: #6b645d;
    }
  </style>
</head>
<body>
  <main class="container">
    <h1>Calcular Comisiones de Vendedores</h1>

    <form id="report-form" method="post" action="/comisiones">
      <div class="input-group">
        <label for="fechaInicio">Seleccione Fecha de Inicio:</label>
        <input type="date" id="fechaInicio" name="fecha_inicio" value="{{FECHA_INICIO}}" />
      </div>

      <div class="input-group">
        <label for="fechaFin">Seleccione Fecha de Fin:</label>
        <input type="date" id="fechaFin" name="fecha_fin" value="{{FECHA_FIN}}" />
      </div>

      <button id="calcular" type="submit"{{DISABLED}}>{{BUTTON_LABEL}}</button>
    </form>

    <section class="resultados">
      <h2>Resultados:</h2>
      <div id="results">{{RESULTS}}</div>
    </section>
  </main>

  <template id="loading-template">{{LOADING_HTML}}</template>

  <script>
    const form = document.getElementById('report-form');
    const button = document.getElementById('calcular');
    const results = document.getElementById('results');
    const loadingHtml = document.getElementById('loading-template').innerHTML;

    const setLoading = (loading) => {
      button.disabled = loading;
      button.textContent = loading ? '{{BUTTON_LOADING}}' : '{{BUTTON_IDLE}}';
    };

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      setLoading(true);
      results.innerHTML = loadingHtml;

      try {
        const res = await fetch('/api/comisiones', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({
            fecha_inicio: form.fecha_inicio.value,
            fecha_fin: form.fecha_fin.value
          })
        });
        if (!res.ok) {
          throw new Error(await res.text());
        }
        const data = await res.json();
        results.innerHTML = data.results_html;
      } catch (err) {
        const p = document.createElement('p');
        p.className = 'error-message';
        p.textContent = `No se pudieron cargar las comisiones: ${err.message}`;
        results.replaceChildren(p);
      } finally {
        setLoading(false);
      }
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(entries: &[(&str, f64, f64)]) -> RequestState {
        let mut report = CommissionReport::new();
        for (name, sales, commission) in entries {
            report.insert(*name, *sales, *commission);
        }
        RequestState::Loaded { report }
    }

    #[test]
    fn idle_renders_nothing() {
        assert_eq!(render_results(&RequestState::Idle), "");
    }

    #[test]
    fn loading_disables_button() {
        let html = render_index(
            &DateInputs::new("2025-06-01", "2025-06-30"),
            &RequestState::Loading,
        );
        assert!(html.contains(r#"type="submit" disabled>Calculando...</button>"#));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn idle_page_has_enabled_button_and_inputs() {
        let html = render_index(
            &DateInputs::new("2025-06-01", "2025-06-30"),
            &RequestState::Idle,
        );
        assert!(html.contains(r#"type="submit">Calcular Comisiones</button>"#));
        assert!(html.contains(r#"value="2025-06-01""#));
        assert!(html.contains(r#"value="2025-06-30""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn placeholder_text_in_inputs_is_kept_literally() {
        let html = render_index(
            &DateInputs::new("{{FECHA_FIN}}", "2025-06-30"),
            &RequestState::Error {
                message: "{{RESULTS}}".into(),
            },
        );
        assert!(html.contains(r#"name="fecha_inicio" value="{{FECHA_FIN}}""#));
        assert!(html.contains(r#"name="fecha_fin" value="2025-06-30""#));
        assert!(html.contains(r#"role="alert">{{RESULTS}}</p>"#));
        assert_eq!(html.matches("{{").count(), 2);
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let filled = fill_template("a {{X}} b {{Y}} {{", |key| (key == "X").then_some("1"));
        assert_eq!(filled, "a 1 b {{Y}} {{");
    }

    #[test]
    fn error_renders_message_without_table() {
        let html = render_results(&RequestState::Error {
            message: "no data for range".into(),
        });
        assert_eq!(
            html,
            r#"<p class="error-message" role="alert">no data for range</p>"#
        );
    }

    #[test]
    fn empty_report_renders_no_results() {
        let html = render_results(&loaded(&[]));
        assert!(html.contains(NO_RESULTS_MESSAGE));
        assert!(!html.contains("<table"));
        assert!(!html.contains("error-message"));
    }

    #[test]
    fn report_renders_one_row_per_entry() {
        let html = render_results(&loaded(&[("Alice", 1000.5, 100.05)]));
        assert_eq!(html.matches("<tr><td>").count(), 1);
        assert!(html.contains("<tr><td>Alice</td><td>$1000.50</td><td>$100.05</td></tr>"));
    }

    #[test]
    fn rows_follow_report_order() {
        let html = render_results(&loaded(&[("Zoe", 1.0, 0.1), ("Alice", 2.0, 0.2)]));
        assert!(html.find("Zoe").unwrap() < html.find("Alice").unwrap());
    }

    #[test]
    fn text_is_escaped() {
        let html = render_results(&loaded(&[("<b>Ana & Co</b>", 1.0, 0.1)]));
        assert!(html.contains("&lt;b&gt;Ana &amp; Co&lt;/b&gt;"));

        let err = render_results(&RequestState::Error {
            message: "<script>".into(),
        });
        assert!(err.contains("&lt;script&gt;"));
    }

    #[test]
    fn amounts_use_two_decimals() {
        assert_eq!(format_amount(0.0), "$0.00");
        assert_eq!(format_amount(1234.5678), "$1234.57");
        assert_eq!(format_amount(-5.0), "$-5.00");
    }
}
