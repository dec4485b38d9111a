//! Print-time page adjustments and export options.

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;

/// A4 in inches, used when the page declares no `@page` size.
pub const A4_WIDTH_IN: f64 = 8.27;
pub const A4_HEIGHT_IN: f64 = 11.69;

/// Quiet period that counts as "network idle".
pub const IDLE_WINDOW: Duration = Duration::from_millis(500);

/// Lets the dark terminal theme print on white paper.
pub const PRINT_OVERRIDE_CSS: &str = r#"@media print {
  * {
    color-adjust: auto !important;
    -webkit-print-color-adjust: auto !important;
    print-color-adjust: auto !important;
  }
  body, html, .page {
    background: white !important;
    background-color: white !important;
  }
  .bg-terminal-black, .bg-black {
    background: white !important;
    background-color: white !important;
  }
}"#;

const NETWORK_IDLE_TEMPLATE: &str = r#"new Promise((resolve) => {
  const quietMs = __QUIET_MS__;
  let seen = performance.getEntriesByType('resource').length;
  let quietSince = performance.now();
  const tick = () => {
    const count = performance.getEntriesByType('resource').length;
    if (count !== seen) {
      seen = count;
      quietSince = performance.now();
    }
    if (document.readyState === 'complete' && performance.now() - quietSince >= quietMs) {
      const fonts = document.fonts ? document.fonts.ready : Promise.resolve();
      fonts.then(() => resolve(true));
      return;
    }
    setTimeout(tick, 50);
  };
  tick();
})"#;

/// Script that resolves once the document has loaded and no resource fetch has
/// completed for `window`. Requests still in flight are not visible to it.
pub fn network_idle_script(window: Duration) -> String {
    NETWORK_IDLE_TEMPLATE.replace("__QUIET_MS__", &window.as_millis().to_string())
}

/// Script that appends `css` to `<head>` as a `<style>` element.
pub fn style_injection_script(css: &str) -> Result<String, serde_json::Error> {
    let literal = serde_json::to_string(css)?;
    Ok(format!(
        "(() => {{ const style = document.createElement('style'); \
         style.textContent = {literal}; \
         (document.head || document.documentElement).appendChild(style); \
         return true; }})()"
    ))
}

/// CSS page size wins; backgrounds on; no margins, header or footer.
pub fn pdf_params() -> PrintToPdfParams {
    PrintToPdfParams {
        print_background: Some(true),
        prefer_css_page_size: Some(true),
        display_header_footer: Some(false),
        paper_width: Some(A4_WIDTH_IN),
        paper_height: Some(A4_HEIGHT_IN),
        margin_top: Some(0.0),
        margin_bottom: Some(0.0),
        margin_left: Some(0.0),
        margin_right: Some(0.0),
        ..Default::default()
    }
}
