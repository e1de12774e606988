//! Locates the dropdowns and result table on course list pages.

use html_scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::listing::errors::{Result, ScrapeError};

static TERM_OPTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("select#term_code").expect("valid selector"));
static SUBJECT_OPTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("select#term_subj").expect("valid selector"));
static OPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("option").expect("valid selector"));
static TABLE_BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table tbody").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("valid selector"));

/// Term and subjects read off the listing root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    /// Latest selectable term, if the dropdown has one.
    pub term: Option<String>,
    /// Subject codes in page order, placeholder excluded.
    pub subjects: Vec<String>,
}

/// Parses the term and subject dropdowns from the listing root page.
///
/// The term dropdown ends with a non-selectable sentinel, so the latest real term
/// is the second-to-last option. The subject dropdown opens with a placeholder.
pub fn parse_discovery(body: &str) -> Result<Discovered> {
    let html = Html::parse_document(body);

    let terms = dropdown_values(&html, &TERM_OPTIONS, "term dropdown (select#term_code)")?;
    let subjects = dropdown_values(&html, &SUBJECT_OPTIONS, "subject dropdown (select#term_subj)")?;

    let term = terms
        .len()
        .checked_sub(2)
        .map(|latest| terms[latest].clone());

    Ok(Discovered {
        term,
        subjects: subjects.into_iter().skip(1).collect(),
    })
}

fn dropdown_values(html: &Html, select: &Selector, what: &str) -> Result<Vec<String>> {
    let dropdown = html
        .select(select)
        .next()
        .ok_or_else(|| ScrapeError::Discovery(what.to_string()))?;

    Ok(dropdown.select(&OPTION).map(option_value).collect())
}

fn option_value(option: ElementRef<'_>) -> String {
    match option.attr("value") {
        Some(value) => value.trim().to_string(),
        None => option.text().collect::<String>().trim().to_string(),
    }
}

/// Extracts the raw cell text of every data row in the search results table.
///
/// Cell text is returned as-is; trimming and parsing belong to the normalizer.
/// Rows without `<td>` cells (the header row, spacers) are skipped.
pub fn parse_course_rows(body: &str) -> Result<Vec<Vec<String>>> {
    let html = Html::parse_document(body);

    let tbody = html
        .select(&TABLE_BODY)
        .next()
        .ok_or_else(|| ScrapeError::Discovery("result table body".to_string()))?;

    Ok(tbody
        .select(&ROW)
        .map(|tr| {
            tr.select(&CELL)
                .map(|td| td.text().collect::<String>())
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect())
}
