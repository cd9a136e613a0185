//! End-to-end tests for the section content pipeline

use procdoc::content_processor::{
    classify, process_content, reconstruct_lists, sanitize, ContentKind, ContentProcessor,
    Environment,
};

const PLACEHOLDER: &str = "<p>No completado</p>";

#[test]
fn test_every_empty_form_renders_placeholder() {
    for content in ["", " ", "\n\t", "<p><br></p>", "  <p><br></p>  "] {
        assert_eq!(classify(content), ContentKind::Empty, "{content:?}");
        assert_eq!(process_content(content), PLACEHOLDER, "{content:?}");
    }
}

#[test]
fn test_editor_lines_become_one_ordered_list() {
    let html = "<div>1. A</div><div>2. B</div><div>3. C</div>";
    let result = process_content(html);
    assert_eq!(result.matches("<ol").count(), 1);
    assert_eq!(result.matches("<li>").count(), 3);
    assert!(result.find("A").unwrap_or(usize::MAX) < result.find("B").unwrap_or(0));
    assert!(result.find("B").unwrap_or(usize::MAX) < result.find("C").unwrap_or(0));
}

#[test]
fn test_repeated_one_opens_second_list() {
    let result = reconstruct_lists("<div>1. A</div><div>1. B</div>");
    assert_eq!(result.matches("<ol>").count(), 2);
}

#[test]
fn test_marker_kind_change_splits_lists() {
    let result = reconstruct_lists("<div>1. A</div><div>- B</div>");
    assert_eq!(result, "<ol>\n<li>A</li>\n</ol>\n<ul>\n<li>B</li>\n</ul>");
}

#[test]
fn test_realistic_editor_output() {
    let html = concat!(
        "<div>Los pasos son:</div>",
        "<div>1. Solicitar permiso</div>",
        "<div>2. Presentar documentación</div>",
        "<div>a) DNI</div>",
        "<div>b) Seguro</div>",
        "<p><br></p>",
        "<div>- Nota: <em>traer casco</em></div>",
    );

    assert_eq!(
        process_content(html),
        concat!(
            "<p class=\"pdf-paragraph\">Los pasos son:</p>\n",
            "<ol class=\"pdf-ordered-list\">\n<li>Solicitar permiso</li>\n<li>Presentar documentación</li>\n</ol>\n",
            "<ol class=\"pdf-sublist\">\n<li>DNI</li>\n<li>Seguro</li>\n</ol>\n",
            "<br>\n",
            "<ul class=\"pdf-unordered-list\">\n<li>Nota: <em>traer casco</em></li>\n</ul>"
        )
    );
}

#[test]
fn test_already_structured_html_keeps_structure() {
    let html = "<h2>Definiciones</h2><ul><li>ISO: norma</li><li>EPP: equipo</li></ul>";
    assert_eq!(sanitize(html, Environment::Client), html);
    assert_eq!(
        process_content(html),
        "<h2 class=\"pdf-heading-2\">Definiciones</h2><ul class=\"pdf-unordered-list\"><li>ISO: norma</li><li>EPP: equipo</li></ul>"
    );
}

#[test]
fn test_hostile_markup_is_neutralized() {
    let html = concat!(
        "<div onmouseover=\"steal()\">1. Uno</div>",
        "<script>document.cookie</script>",
        "<div><a href=\"javascript:alert(1)\">2. Dos</a></div>",
        "<iframe src=\"https://evil.example\"></iframe>",
    );
    let result = process_content(html);

    assert!(!result.contains("script"));
    assert!(!result.contains("onmouseover"));
    assert!(!result.contains("javascript"));
    assert!(!result.contains("iframe"));
    assert_eq!(
        result,
        "<ol class=\"pdf-ordered-list\">\n<li>Uno</li>\n<li>Dos</li>\n</ol>"
    );
}

#[test]
fn test_plain_text_dictation() {
    let text = "Objetivo del area\n\n1. Revisar\n2. Firmar\n\nFin";
    assert_eq!(
        process_content(text),
        concat!(
            "<p>Objetivo del area</p>\n",
            "<ol class=\"pdf-ordered-list\"><li>Revisar</li><li>Firmar</li></ol>\n",
            "<p>Fin</p>"
        )
    );
}

#[test]
fn test_plain_text_is_escaped() {
    let result = process_content("Temperatura < 40 & humedad > 20");
    assert_eq!(result, "<p>Temperatura &lt; 40 &amp; humedad &gt; 20</p>");
}

#[test]
fn test_environments_agree_on_trusted_markup() {
    let html = "<div>1. Uno</div><div>2. Dos</div>";
    let client = ContentProcessor::new(Environment::Client).process(html);
    let server = ContentProcessor::new(Environment::Server).process(html);
    assert_eq!(client, server);
}
