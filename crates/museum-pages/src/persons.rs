use museum_core::{
  graph::PersonDetail,
  model::{Country, Exhibit, Person},
};

use crate::{date_input, escape, form, format_date, layout, select, text_input};

pub fn persons_list(persons: &[Person]) -> String {
  let mut body = String::from(
    "<p><a class=\"btn btn-outline-primary\" href=\"/persons/create\">Add person</a></p>\n\
     <ul class=\"list-group\">\n",
  );
  for p in persons {
    body.push_str(&format!(
      "<li class=\"list-group-item\"><a href=\"/persons/{}\">{}</a> <small class=\"text-muted\">born {}</small></li>\n",
      p.id,
      escape(&p.name),
      format_date(p.birth_date),
    ));
  }
  body.push_str("</ul>\n");
  layout("Persons", &body)
}

pub fn person_detail(detail: &PersonDetail) -> String {
  let mut body = format!(
    "<dl>\n<dt>Born</dt><dd>{}</dd>\n",
    format_date(detail.person.birth_date)
  );
  if let Some(death) = &detail.death {
    body.push_str(&format!("<dt>Died</dt><dd>{}</dd>\n", format_date(death.death)));
  }
  let countries = detail
    .countries
    .iter()
    .map(|c| escape(&c.name))
    .collect::<Vec<_>>()
    .join(", ");
  body.push_str(&format!("<dt>Countries</dt><dd>{countries}</dd>\n</dl>\n"));

  body.push_str("<h2>Exhibits</h2>\n");
  if detail.exhibits.is_empty() {
    body.push_str("<p class=\"text-muted\">No exhibits.</p>\n");
  } else {
    body.push_str("<ul>\n");
    for e in &detail.exhibits {
      body.push_str(&format!(
        "<li>{} <span class=\"badge text-bg-secondary\">{}</span> ({})</li>\n",
        escape(&e.exhibit.title),
        escape(&e.exhibit_type.name),
        format_date(e.exhibit.release_date),
      ));
    }
    body.push_str("</ul>\n");
  }

  layout(&detail.person.name, &body)
}

pub fn person_form(countries: &[Country], exhibits: &[Exhibit]) -> String {
  let fields = [
    text_input("name", "Name"),
    date_input("birth_date", "Birth date", true),
    date_input("death", "Death date", false),
    select(
      "countries",
      "Countries",
      true,
      countries.iter().map(|c| (c.id, c.name.as_str())),
    ),
    select(
      "exhibits",
      "Exhibits",
      true,
      exhibits.iter().map(|e| (e.id, e.title.as_str())),
    ),
  ];
  layout("New person", &form("/persons/create", &fields))
}
