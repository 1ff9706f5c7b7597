//! Partner brand list and per-brand shop-link templates.
//!
//! The templates are an instruction contract: they are rendered into the
//! plan generator's system prompt and the generator is asked to follow them.
//! Nothing here verifies that a returned link actually targets the brand's
//! search endpoint, only that it is a syntactically valid URL (checked in
//! `stylist::plan`).

use url::form_urlencoded;

/// Brands we hypothetically have affiliate links for. The generator is
/// instructed to prioritize these when budget-appropriate and to flag items
/// drawn from this set with `isAffiliate = true`.
pub const PARTNER_BRANDS: [&str; 10] = [
    "Target",
    "Uniqlo",
    "Express",
    "H&M",
    "Zara",
    "Banana Republic",
    "Aerie",
    "Macy's",
    "Nordstrom",
    "Amazon Fashion",
];

/// Brand name → search URL template. `{keywords}` is replaced with
/// percent-encoded keywords, `{keywords-dashed}` with lowercased
/// dash-joined keywords.
pub const BRAND_SEARCH_TEMPLATES: [(&str, &str); 10] = [
    ("Target", "https://www.target.com/s?searchTerm={keywords}"),
    ("Uniqlo", "https://www.uniqlo.com/us/en/search?q={keywords}"),
    ("Express", "https://www.express.com/search?q={keywords}"),
    ("H&M", "https://www2.hm.com/en_us/search-results.html?q={keywords}"),
    ("Zara", "https://www.zara.com/us/en/search?searchTerm={keywords}"),
    (
        "Banana Republic",
        "https://bananarepublic.gap.com/browse/search.do?searchText={keywords}",
    ),
    ("Aerie", "https://www.ae.com/us/en/s/{keywords}"),
    ("Macy's", "https://www.macys.com/shop/featured/{keywords-dashed}"),
    ("Amazon", "https://www.amazon.com/s?k={keywords}"),
    (
        "Nordstrom",
        "https://www.nordstrom.com/sr?origin=keywordsearch&keyword={keywords}",
    ),
];

const FALLBACK_SEARCH: &str = "https://www.google.com/search?tbm=shop&q={keywords}";

fn encode_keywords(keywords: &str) -> String {
    form_urlencoded::byte_serialize(keywords.as_bytes()).collect()
}

fn dash_keywords(keywords: &str) -> String {
    keywords
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn fill_template(template: &str, keywords: &str) -> String {
    template
        .replace("{keywords-dashed}", &dash_keywords(keywords))
        .replace("{keywords}", &encode_keywords(keywords))
}

/// Render the search URL for a brand, falling back to a generic web-shopping
/// search when the brand is not in the template table.
pub fn search_url(brand: &str, keywords: &str) -> String {
    let template = BRAND_SEARCH_TEMPLATES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(brand))
        .map_or(FALLBACK_SEARCH, |(_, template)| template);
    fill_template(template, keywords)
}

/// The linking rules block of the plan generator's system instruction.
pub fn linking_rules() -> String {
    let mut rules = String::from(
        "LINKING INSTRUCTIONS (CRITICAL - DIRECT STORE LINKS):\n\
         - Users want to be taken DIRECTLY to the brand's website store page to buy the item.\n\
         - Do NOT generate generic Google Search links if possible.\n\
         - Construct the URL to search specifically on the brand's domain.\n\
         - Use these patterns for major brands:\n",
    );
    for (brand, template) in BRAND_SEARCH_TEMPLATES {
        rules.push_str(&format!("  * {brand}: \"{template}\"\n"));
    }
    rules.push_str(
        "- For other brands, try to use their standard search URL pattern (e.g. domain.com/search?q=...).\n\
         - Ensure keywords are URL encoded (spaces to %20 or +).\n\
         - ONLY fallback to Google Shopping if the brand's site is unknown.",
    );
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_uses_brand_template() {
        let url = search_url("Target", "wool blend blazer");
        assert!(url.starts_with("https://www.target.com/s?searchTerm="));
        assert!(!url.contains(' '));
    }

    #[test]
    fn search_url_is_case_insensitive_on_brand() {
        assert_eq!(
            search_url("h&m", "satin slip dress"),
            search_url("H&M", "satin slip dress"),
        );
    }

    #[test]
    fn macys_template_dashes_keywords() {
        let url = search_url("Macy's", "Silk Midi Skirt");
        assert_eq!(url, "https://www.macys.com/shop/featured/silk-midi-skirt");
    }

    #[test]
    fn unknown_brand_falls_back_to_shopping_search() {
        let url = search_url("Maison Margiela", "tabi boots");
        assert!(url.starts_with("https://www.google.com/search?tbm=shop&q="));
    }

    #[test]
    fn every_template_fills_to_a_parseable_url() {
        for (brand, _) in BRAND_SEARCH_TEMPLATES {
            let filled = search_url(brand, "oversized leather jacket");
            url::Url::parse(&filled).unwrap();
        }
    }

    #[test]
    fn linking_rules_mention_every_template_brand() {
        let rules = linking_rules();
        for (brand, _) in BRAND_SEARCH_TEMPLATES {
            assert!(rules.contains(brand), "missing {brand}");
        }
    }
}
