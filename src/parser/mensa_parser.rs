// Studentenwerk menu page parsing
use crate::model::ParserError;
use crate::normalizer::{collapse_whitespace, dedup_preserving_order};
use ::scraper::{ElementRef, Html, Selector};

pub trait Parser {
    /// Dish names in page order, without duplicates.
    fn parse(&self, html: &str) -> Result<Vec<String>, ParserError>;
}

pub struct MensaParser;

impl MensaParser {
    pub fn new() -> Self {
        Self
    }

    /// Text directly inside the cell; nested markup such as allergen `<sup>` is skipped.
    fn meal_text(cell: ElementRef) -> String {
        let own_text: String = cell
            .children()
            .filter_map(|node| node.value().as_text())
            .map(|text| &**text)
            .collect();
        collapse_whitespace(&own_text)
    }
}

impl Parser for MensaParser {
    fn parse(&self, html: &str) -> Result<Vec<String>, ParserError> {
        let document = Html::parse_document(html);

        let row_selector = Selector::parse(
            "div.tx-bwrkspeiseplan__hauptgerichte table.tx-bwrkspeiseplan__table-meals tr",
        )
        .map_err(|e| ParserError::HtmlParseError(e.to_string()))?;
        let cell_selector =
            Selector::parse("td").map_err(|e| ParserError::HtmlParseError(e.to_string()))?;

        let items = document
            .select(&row_selector)
            .filter_map(|row| row.select(&cell_selector).next())
            .map(Self::meal_text)
            .filter(|text| !text.is_empty())
            .collect();

        Ok(dedup_preserving_order(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="tx-bwrkspeiseplan__hauptgerichte">
          <table class="tx-bwrkspeiseplan__table-meals">
            <tr><th>Gericht</th></tr>
            <tr><td>Spaghetti   Bolognese <sup>1,3,A</sup> mit Parmesan</td><td>3,20 €</td></tr>
            <tr><td>
                Rindergulasch
                <sup>G</sup>
            </td></tr>
            <tr><td><sup>V</sup></td></tr>
            <tr><td>Spaghetti Bolognese <sup>9</sup>mit Parmesan</td></tr>
          </table>
        </div>
        <div class="tx-bwrkspeiseplan__beilagen">
          <table class="tx-bwrkspeiseplan__table-meals">
            <tr><td>Pommes frites</td></tr>
          </table>
        </div>
        <div class="tx-bwrkspeiseplan__hauptgerichte">
          <table class="tx-bwrkspeiseplan__table-meals">
            <tr><td>Apfelstrudel</td></tr>
          </table>
        </div>
        </body></html>
    "#;

    #[test]
    fn extracts_main_dishes() {
        let items = MensaParser::new().parse(PAGE).unwrap();
        assert_eq!(
            items,
            vec!["Spaghetti Bolognese mit Parmesan", "Rindergulasch", "Apfelstrudel"]
        );
    }

    #[test]
    fn page_without_menu_gives_no_items() {
        let items = MensaParser::new()
            .parse("<html><body><p>Heute geschlossen</p></body></html>")
            .unwrap();
        assert!(items.is_empty());
    }
}
