use museum_core::{
  graph::ExhibitOverview,
  model::{ExhibitType, Museum, Person},
};

use crate::{date_input, escape, form, format_date, layout, select, text_input};

/// The home page: every exhibit, newest first.
pub fn exhibits_index(exhibits: &[ExhibitOverview]) -> String {
  let mut body = String::from(
    "<p><a class=\"btn btn-outline-primary\" href=\"/exhibits/create\">Add exhibit</a></p>\n",
  );

  if exhibits.is_empty() {
    body.push_str("<p class=\"text-muted\">The catalog is empty.</p>\n");
    return layout("Exhibits", &body);
  }

  body.push_str(
    "<table class=\"table\">\n<thead><tr><th>Title</th><th>Type</th><th>Released</th>\
     <th>Museum</th><th>Persons</th></tr></thead>\n<tbody>\n",
  );
  for o in exhibits {
    let persons = o
      .persons
      .iter()
      .map(|p| format!("<a href=\"/persons/{}\">{}</a>", p.id, escape(&p.name)))
      .collect::<Vec<_>>()
      .join(", ");
    body.push_str(&format!(
      "<tr><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/museums/{}\">{}</a></td><td>{}</td></tr>\n",
      escape(&o.exhibit.title),
      escape(&o.exhibit_type.name),
      format_date(o.exhibit.release_date),
      o.museum.id,
      escape(&o.museum.name),
      persons,
    ));
  }
  body.push_str("</tbody>\n</table>\n");

  layout("Exhibits", &body)
}

pub fn exhibit_form(
  museums: &[Museum],
  persons: &[Person],
  types: &[ExhibitType],
) -> String {
  let fields = [
    text_input("title", "Title"),
    date_input("release_date", "Release date", true),
    select("type_id", "Type", false, types.iter().map(|t| (t.id, t.name.as_str()))),
    select(
      "museum_id",
      "Museum",
      false,
      museums.iter().map(|m| (m.id, m.name.as_str())),
    ),
    select(
      "persons",
      "Persons",
      true,
      persons.iter().map(|p| (p.id, p.name.as_str())),
    ),
  ];
  layout("New exhibit", &form("/exhibits/create", &fields))
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use museum_core::model::Exhibit;

  use super::*;

  fn d(y: i32) -> NaiveDate { NaiveDate::from_ymd_opt(y, 1, 1).unwrap() }

  fn overview(id: i64, persons: Vec<Person>) -> ExhibitOverview {
    ExhibitOverview {
      exhibit: Exhibit {
        id,
        release_date: d(1500),
        title: format!("Work {id}"),
        type_id: 1,
        museum_id: 2,
      },
      exhibit_type: ExhibitType { id: 1, name: "painting".into() },
      museum: Museum { id: 2, name: "Uffizi".into(), foundation_date: d(1581), city_id: 1 },
      persons,
    }
  }

  #[test]
  fn index_keeps_given_order_and_links() {
    let html = exhibits_index(&[
      overview(2, vec![Person { id: 9, name: "Botticelli".into(), birth_date: d(1445) }]),
      overview(1, vec![]),
    ]);
    let second = html.find("Work 2").unwrap();
    let first = html.find("Work 1").unwrap();
    assert!(second < first);
    assert!(html.contains("<a href=\"/museums/2\">Uffizi</a>"));
    assert!(html.contains("<a href=\"/persons/9\">Botticelli</a>"));
  }

  #[test]
  fn empty_index() {
    let html = exhibits_index(&[]);
    assert!(html.contains("The catalog is empty."));
    assert!(!html.contains("<table"));
  }

  #[test]
  fn form_selects() {
    let html = exhibit_form(&[], &[], &[ExhibitType { id: 5, name: "coin".into() }]);
    assert!(html.contains("name=\"type_id\" required"));
    assert!(html.contains("<option value=\"5\">coin</option>"));
    assert!(html.contains("name=\"persons\" multiple"));
  }
}
