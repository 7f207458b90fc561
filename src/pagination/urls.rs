const SERVER_PLACEHOLDER: &str = "SERVER";
const PAGE_PLACEHOLDER: &str = "PAGE";

/// Build a page URL by substituting `SERVER` and `PAGE` in the template
pub fn build_page_url(template: &str, server: &str, page: usize) -> String {
    template
        .replace(SERVER_PLACEHOLDER, server)
        .replace(PAGE_PLACEHOLDER, &page.to_string())
}

/// Check that a template carries both placeholders
pub fn has_placeholders(template: &str) -> bool {
    template.contains(SERVER_PLACEHOLDER) && template.contains(PAGE_PLACEHOLDER)
}
