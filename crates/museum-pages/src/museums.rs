use museum_core::{
  graph::MuseumDetail,
  model::{City, Museum},
};

use crate::{date_input, escape, form, format_date, layout, select, text_input};

pub fn museums_list(museums: &[Museum]) -> String {
  let mut body = String::from(
    "<p><a class=\"btn btn-outline-primary\" href=\"/museums/create\">Add museum</a></p>\n\
     <ul class=\"list-group\">\n",
  );
  for m in museums {
    body.push_str(&format!(
      "<li class=\"list-group-item\"><a href=\"/museums/{}\">{}</a> <small class=\"text-muted\">founded {}</small></li>\n",
      m.id,
      escape(&m.name),
      format_date(m.foundation_date),
    ));
  }
  body.push_str("</ul>\n");
  layout("Museums", &body)
}

pub fn museum_detail(detail: &MuseumDetail) -> String {
  let mut body = format!(
    "<dl>\n\
     <dt>Founded</dt><dd>{}</dd>\n\
     <dt>City</dt><dd>{}</dd>\n\
     <dt>Country</dt><dd>{}</dd>\n\
     </dl>\n\
     <h2>Exhibits</h2>\n",
    format_date(detail.museum.foundation_date),
    escape(&detail.city.name),
    escape(&detail.country.name),
  );

  if detail.exhibits.is_empty() {
    body.push_str("<p class=\"text-muted\">No exhibits.</p>\n");
  } else {
    body.push_str(
      "<table class=\"table\">\n<thead><tr><th>Title</th><th>Type</th><th>Released</th></tr></thead>\n<tbody>\n",
    );
    for e in &detail.exhibits {
      body.push_str(&format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        escape(&e.exhibit.title),
        escape(&e.exhibit_type.name),
        format_date(e.exhibit.release_date),
      ));
    }
    body.push_str("</tbody>\n</table>\n");
  }

  layout(&detail.museum.name, &body)
}

pub fn museum_form(cities: &[City]) -> String {
  let fields = [
    text_input("name", "Name"),
    date_input("foundation_date", "Foundation date", true),
    select("city_id", "City", false, cities.iter().map(|c| (c.id, c.name.as_str()))),
  ];
  layout("New museum", &form("/museums/create", &fields))
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use museum_core::{
    graph::ExhibitEntry,
    model::{Country, Exhibit, ExhibitType},
  };

  use super::*;

  fn detail(exhibits: Vec<ExhibitEntry>) -> MuseumDetail {
    MuseumDetail {
      museum:  Museum {
        id:              1,
        name:            "M & Co".into(),
        foundation_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        city_id:         1,
      },
      city:    City { id: 1, name: "Y".into(), country_id: 1 },
      country: Country { id: 1, name: "X".into() },
      exhibits,
    }
  }

  #[test]
  fn detail_shows_location_and_empty_exhibits() {
    let html = museum_detail(&detail(vec![]));
    assert!(html.contains("<h1>M &amp; Co</h1>"));
    assert!(html.contains("<dd>Y</dd>"));
    assert!(html.contains("<dd>X</dd>"));
    assert!(html.contains("No exhibits."));
  }

  #[test]
  fn detail_lists_exhibit_types() {
    let entry = ExhibitEntry {
      exhibit:      Exhibit {
        id:           3,
        release_date: NaiveDate::from_ymd_opt(1503, 1, 1).unwrap(),
        title:        "Mona Lisa".into(),
        type_id:      1,
        museum_id:    1,
      },
      exhibit_type: ExhibitType { id: 1, name: "painting".into() },
    };
    let html = museum_detail(&detail(vec![entry]));
    assert!(html.contains("<td>Mona Lisa</td><td>painting</td><td>1503-01-01</td>"));
  }

  #[test]
  fn form_offers_cities() {
    let html = museum_form(&[City { id: 4, name: "Paris".into(), country_id: 1 }]);
    assert!(html.contains("action=\"/museums/create\""));
    assert!(html.contains("<option value=\"4\">Paris</option>"));
    assert!(html.contains("name=\"foundation_date\""));
  }
}
