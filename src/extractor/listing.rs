//! Job-card extraction from a search-results HTML document.
//!
//! Selectors target the card markup of the public search page; all of them
//! are cached, and every accessor trims and drops empty strings.

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// One search-result card, fields as found in the document.
#[derive(Debug, Clone, Default)]
pub struct ListingCard {
    pub id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub posted_time: Option<String>,
}

pub struct ListingExtractor;

impl ListingExtractor {
    /// Extract every job card from a search-results page.
    pub fn extract_cards(html: &str) -> Vec<ListingCard> {
        static CARD: OnceLock<Selector> = OnceLock::new();
        static TITLE: OnceLock<Selector> = OnceLock::new();
        static COMPANY: OnceLock<Selector> = OnceLock::new();
        static LOCATION: OnceLock<Selector> = OnceLock::new();
        static LINK: OnceLock<Selector> = OnceLock::new();
        static LISTDATE: OnceLock<Selector> = OnceLock::new();

        let card_selector = CARD.get_or_init(|| Selector::parse(".job-search-card").unwrap());
        let title_selector =
            TITLE.get_or_init(|| Selector::parse(".base-search-card__title").unwrap());
        let company_selector =
            COMPANY.get_or_init(|| Selector::parse(".base-search-card__subtitle").unwrap());
        let location_selector =
            LOCATION.get_or_init(|| Selector::parse(".job-search-card__location").unwrap());
        let link_selector =
            LINK.get_or_init(|| Selector::parse("a.base-card__full-link").unwrap());
        let listdate_selector =
            LISTDATE.get_or_init(|| Selector::parse(".job-search-card__listdate").unwrap());

        let document = Html::parse_document(html);
        document
            .select(card_selector)
            .map(|card| ListingCard {
                id: card
                    .value()
                    .attr("data-id")
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                title: Self::inner_text(&card, title_selector),
                company: Self::inner_text(&card, company_selector),
                location: Self::inner_text(&card, location_selector),
                link: card
                    .select(link_selector)
                    .next()
                    .and_then(|el| el.value().attr("href"))
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                posted_time: Self::inner_text(&card, listdate_selector),
            })
            .collect()
    }

    fn inner_text(card: &ElementRef, selector: &Selector) -> Option<String> {
        card.select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><ul>
<li class="job-search-card" data-id="4021337">
  <a class="base-card__full-link" href="https://example.com/jobs/view/4021337">
    <span class="base-search-card__title"> Software Engineer </span>
  </a>
  <h4 class="base-search-card__subtitle">Acme Corp</h4>
  <span class="job-search-card__location">Austin, TX</span>
  <time class="job-search-card__listdate">2 days ago</time>
</li>
<li class="job-search-card" data-id="4021401">
  <span class="base-search-card__title">Backend Developer</span>
  <h4 class="base-search-card__subtitle">Beta LLC</h4>
</li>
</ul></body></html>"#;

    #[test]
    fn extracts_all_cards_with_fields() {
        let cards = ListingExtractor::extract_cards(PAGE);
        assert_eq!(cards.len(), 2);

        let first = &cards[0];
        assert_eq!(first.id.as_deref(), Some("4021337"));
        assert_eq!(first.title.as_deref(), Some("Software Engineer"));
        assert_eq!(first.company.as_deref(), Some("Acme Corp"));
        assert_eq!(first.location.as_deref(), Some("Austin, TX"));
        assert_eq!(
            first.link.as_deref(),
            Some("https://example.com/jobs/view/4021337")
        );
        assert_eq!(first.posted_time.as_deref(), Some("2 days ago"));
    }

    #[test]
    fn missing_fields_are_none() {
        let cards = ListingExtractor::extract_cards(PAGE);
        let second = &cards[1];
        assert_eq!(second.title.as_deref(), Some("Backend Developer"));
        assert_eq!(second.location, None);
        assert_eq!(second.link, None);
        assert_eq!(second.posted_time, None);
    }

    #[test]
    fn page_without_cards_yields_nothing() {
        let cards = ListingExtractor::extract_cards("<html><body><p>No results</p></body></html>");
        assert!(cards.is_empty());
    }
}
