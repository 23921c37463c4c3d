//! Snapshot tests over a realistic pattern file.

use crate::common::{extract, extract_verbatim, fixture};
use insta::assert_snapshot;

#[test]
fn structural_table_json() {
    let source = fixture("patterns.html");
    let table = extract(&source, ".c-card, .c-button");

    assert_snapshot!(table.to_json().unwrap(), @r###"
    {
      "c-card-01--featured": {
        "prefix": "c-card-01--featured",
        "body": [
          "<div class=\"c-card c-card--featured\">",
          "\t<img class=\"c-card__image\" src=\"card.png\" alt=\"\">",
          "\t<h3 class=\"c-card__title\"><?php echo \\$title; ?></h3>",
          "\t<p class=\"c-card__text\">",
          "\t\tPrice: \\$price",
          "\t</p>",
          "</div>"
        ]
      },
      "c-card-02": {
        "prefix": "c-card-02",
        "body": [
          "<div class=\"c-card\">",
          "\t<h3 class=\"c-card__title\">Plain</h3>",
          "</div>"
        ]
      },
      "c-button-01--primary--large": {
        "prefix": "c-button-01--primary--large",
        "body": [
          "<a class=\"c-button c-button--primary c-button--large\" href=\"#\">",
          "\tGo",
          "</a>"
        ]
      }
    }
    "###);
}

#[test]
fn verbatim_body_of_featured_card() {
    let source = fixture("patterns.html");
    let table = extract_verbatim(&source, ".c-card--featured");

    let body = table.get("c-card-01--featured").unwrap().body.to_text();
    assert_snapshot!(body, @r###"
    <img class="c-card__image" src="card.png" alt="">
    <h3 class="c-card__title"><?php echo \$title; ?></h3>
    <p class="c-card__text">
      Price: \$price
    </p>
    "###);
}
