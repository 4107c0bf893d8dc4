//! Workflow page HTML
//!
//! Server-rendered from a [`PageView`]. Browser-side behaviour (drop handling,
//! modal click propagation, reload on SSE events) lives in `/static/workflow.js`.

use std::fmt::Write;

use super::{PageView, PlotCard, ResultView, VerdictView};

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const STYLES: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(#0064BB, #0081CC);
            color: #fff;
            min-height: 100vh;
            padding: 32px 16px;
        }
        header { text-align: center; margin-bottom: 40px; }
        h1 { font-size: 48px; font-weight: 700; }
        .tagline { letter-spacing: 4px; opacity: 0.9; }
        .panel {
            max-width: 560px; margin: 0 auto; padding: 32px;
            background: rgba(255,255,255,0.1); border: 1px solid rgba(255,255,255,0.2);
            border-radius: 16px;
        }
        .panel h2 { text-align: center; margin-bottom: 24px; }
        .phrase { border: 1px solid rgba(255,255,255,0.2); border-radius: 12px; padding: 16px; margin-bottom: 24px; text-align: center; }
        .phrase-text { font-style: italic; font-size: 22px; color: #67e8f9; margin-top: 8px; }
        #drop-zone {
            display: flex; flex-direction: column; align-items: center; justify-content: center;
            height: 128px; border: 2px dashed rgba(255,255,255,0.4); border-radius: 12px; cursor: pointer;
        }
        #drop-zone:hover { border-color: rgba(255,255,255,0.6); }
        .hint { font-size: 14px; opacity: 0.7; }
        .validation-error { color: #fecaca; margin-top: 16px; text-align: center; }
        .submit-button {
            width: 100%; margin-top: 16px; padding: 12px; border: 0; border-radius: 12px;
            background: rgba(255,255,255,0.9); color: #0064BB; font-size: 18px; font-weight: 600; cursor: pointer;
        }
        .submit-button:disabled { opacity: 0.5; cursor: not-allowed; }
        .loading { text-align: center; margin-top: 16px; font-size: 18px; font-weight: 600; }
        .spinner {
            width: 32px; height: 32px; margin: 0 auto 8px; border-radius: 50%;
            border-top: 2px solid #fff; border-bottom: 2px solid #fff; animation: spin 1s linear infinite;
        }
        @keyframes spin { to { transform: rotate(360deg); } }
        .results { max-width: 900px; margin: 48px auto 0; }
        .card { background: #fff; color: #374151; border-radius: 16px; padding: 32px; margin-bottom: 32px; text-align: center; }
        .verdict { font-size: 24px; font-weight: 500; }
        .verdict-trust { color: #22c55e; }
        .verdict-caution { color: #ef4444; }
        .badge { display: inline-block; margin-top: 16px; padding: 8px 24px; border-radius: 999px; }
        .badge-trust { background: #f0fdf4; color: #15803d; border: 1px solid #bbf7d0; }
        .badge-caution { background: #fef2f2; color: #b91c1c; border: 1px solid #fecaca; }
        .plots { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 32px; margin-top: 24px; }
        .plot { background: #f9fafb; border-radius: 12px; padding: 16px; text-align: left; }
        .plot-zoom { border: 0; background: none; cursor: zoom-in; width: 100%; }
        .plot-zoom img { width: 100%; border-radius: 8px; }
        .extra { margin-top: 24px; font-size: 14px; }
        .submission-error { color: #b91c1c; font-weight: 600; }
        #modal-backdrop {
            position: fixed; inset: 0; background: rgba(0,0,0,0.9);
            display: flex; align-items: center; justify-content: center; padding: 16px; z-index: 50;
        }
        .modal-body { position: relative; max-width: 95%; max-height: 95vh; }
        .modal-body img { max-height: 95vh; border-radius: 12px; }
        .modal-dismiss {
            position: absolute; top: -16px; right: -16px; width: 32px; height: 32px;
            border: 0; border-radius: 50%; background: #fff; color: #4b5563; cursor: pointer;
        }
"#;

/// Render the full workflow page
pub fn render_page(view: &PageView) -> String {
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SafeSpeak</title>
    <style>{styles}</style>
</head>
<body data-pending="{pending}">
    <header>
        <h1>SafeSpeak</h1>
        <p class="tagline">SAY IT SAFE</p>
    </header>
    <section class="panel">
        <h2>Upload Audio File</h2>
"#,
        styles = STYLES,
        pending = view.loading,
    );

    if let Some(phrase) = &view.phrase {
        let _ = write!(
            html,
            r#"        <div class="phrase" id="phrase-banner">
            <p>Please repeat this phrase:</p>
            <p class="phrase-text">"{}"</p>
        </div>
"#,
            escape_html(phrase)
        );
    }

    render_intake(&mut html, view);
    html.push_str("    </section>\n");

    render_result(&mut html, &view.result);

    if let Some(image) = &view.modal_image {
        render_modal(&mut html, image);
    }

    html.push_str(
        r#"    <script src="/static/workflow.js"></script>
</body>
</html>
"#,
    );
    html
}

fn render_intake(html: &mut String, view: &PageView) {
    let _ = write!(
        html,
        r#"        <form id="intake-form" method="post" action="/intake" enctype="multipart/form-data">
            <label id="drop-zone" for="file-upload">
                <input id="file-upload" type="file" name="file" accept=".wav" hidden>
                <p id="file-label">{}</p>
                <p class="hint">or drag and drop here</p>
            </label>
        </form>
"#,
        escape_html(&view.file_label)
    );

    if let Some(error) = &view.validation_error {
        let _ = writeln!(
            html,
            r#"        <p class="validation-error" id="validation-error">{}</p>"#,
            escape_html(error)
        );
    }

    if view.loading {
        html.push_str(
            r#"        <div class="loading" id="loading">
            <div class="spinner"></div>
            <p>Analyzing...</p>
        </div>
"#,
        );
    } else {
        let _ = write!(
            html,
            r#"        <form method="post" action="/submit">
            <button id="submit-button" class="submit-button" type="submit"{}>Verify Audio</button>
        </form>
"#,
            if view.can_submit { "" } else { " disabled" }
        );
    }
}

fn render_result(html: &mut String, result: &ResultView) {
    match result {
        ResultView::Empty => {}
        ResultView::Error(message) => {
            let _ = write!(
                html,
                r#"    <section class="results">
        <div class="card"><p class="submission-error" id="submission-error">{}</p></div>
    </section>
"#,
                escape_html(message)
            );
        }
        ResultView::Verdict {
            verdict,
            plots,
            extra,
        } => {
            html.push_str("    <section class=\"results\">\n");
            render_verdict(html, verdict);

            html.push_str(
                "        <div class=\"card\">\n            <h2>Detailed Analysis</h2>\n            <div class=\"plots\">\n",
            );
            for card in plots {
                render_plot_card(html, card);
            }
            html.push_str("            </div>\n");

            if !extra.is_empty() {
                html.push_str("            <div class=\"extra\" id=\"extra-fields\">\n");
                for (key, value) in extra {
                    let _ = writeln!(
                        html,
                        "                <p><strong>{}:</strong> {}</p>",
                        escape_html(key),
                        escape_html(value)
                    );
                }
                html.push_str("            </div>\n");
            }
            html.push_str("        </div>\n    </section>\n");
        }
    }
}

fn render_verdict(html: &mut String, verdict: &VerdictView) {
    let tone = verdict.tone.css_class();
    let _ = write!(
        html,
        r#"        <div class="card" id="verdict-card">
            <div class="verdict verdict-{tone}" id="verdict">{label}</div>
            <p>{explanation}</p>
            <div class="badge badge-{tone}">{badge}</div>
        </div>
"#,
        tone = tone,
        label = verdict.label,
        explanation = verdict.explanation,
        badge = verdict.badge,
    );
}

fn render_plot_card(html: &mut String, card: &PlotCard) {
    let image = escape_html(&card.image);
    let _ = write!(
        html,
        r#"                <div class="plot">
                    <h3>{title}</h3>
                    <p>{description}</p>
                    <form method="post" action="/modal/open">
                        <input type="hidden" name="image" value="{image}">
                        <button class="plot-zoom" type="submit"><img src="{image}" alt="{alt}"></button>
                    </form>
                </div>
"#,
        title = card.title,
        description = card.description,
        image = image,
        alt = card.alt,
    );
}

fn render_modal(html: &mut String, image: &str) {
    let _ = write!(
        html,
        r#"    <div id="modal-backdrop" data-close-url="/modal/close">
        <div class="modal-body">
            <form method="post" action="/modal/close">
                <button class="modal-dismiss" id="modal-dismiss" type="submit">✕</button>
            </form>
            <img id="modal-image" src="{}" alt="Enlarged View">
        </div>
    </div>
"#,
        escape_html(image)
    );
}
