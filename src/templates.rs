use maud::{DOCTYPE, Markup, html};

use crate::{
    forms::{FieldKind, FieldSpec, FormValues},
    panel::EntityPanel,
    registry::REGISTRY,
    table::DETAIL_HEADER,
    window::Detail,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const APP_TITLE: &str = "Festival Manager";

const BUTTON: &str = "rounded-md bg-blue-600 px-3 py-1.5 text-sm font-semibold text-white hover:bg-blue-700";
const BUTTON_QUIET: &str = "rounded-md border border-gray-300 bg-white px-3 py-1.5 text-sm text-gray-700 hover:bg-gray-50";
const BUTTON_DANGER: &str = "rounded-md bg-red-600 px-3 py-1.5 text-sm font-semibold text-white hover:bg-red-700";
const INPUT: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";

/// Status line, one-shot error and pending delete confirmation shown around a view.
pub struct Banner<'a> {
    pub status: &'a str,
    pub error: Option<String>,
    pub pending_delete: Option<usize>,
}

pub fn menu_page(banner: &Banner) -> String {
    page(
        APP_TITLE,
        html! {
            div class="max-w-3xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between" {
                    h1 class="text-3xl font-bold text-gray-900" { (APP_TITLE) }
                    form method="post" action="/quit" {
                        button class=(BUTTON_QUIET) type="submit" { "Quit" }
                    }
                }
                (error_banner(banner.error.as_deref()))
                div class="mt-8 grid gap-3 sm:grid-cols-2" {
                    @for entry in &REGISTRY {
                        form method="post" action=(format!("/open/{}", entry.kind.slug())) {
                            button class="w-full rounded-lg bg-white px-4 py-3 text-left font-medium text-gray-900 shadow hover:bg-blue-50" type="submit" {
                                (entry.label)
                            }
                        }
                    }
                }
                (status_line(banner.status))
            }
        },
    )
}

pub fn table_page(panel: &dyn EntityPanel, banner: &Banner) -> String {
    let label = panel.kind().label();
    let rows = panel.rows();

    page(
        label,
        html! {
            div class="max-w-7xl mx-auto px-6 py-10" {
                div class="flex flex-wrap items-center justify-between gap-4" {
                    h1 class="text-2xl font-bold text-gray-900" { (label) }
                    div class="flex gap-2" {
                        form method="post" action="/reload" { button class=(BUTTON_QUIET) type="submit" { "Reload" } }
                        a class=(BUTTON) href="/new" { "New" }
                        form method="post" action="/delete" { button class=(BUTTON_DANGER) type="submit" { "Delete selected" } }
                        form method="post" action="/back" { button class=(BUTTON_QUIET) type="submit" { "Back" } }
                    }
                }
                (error_banner(banner.error.as_deref()))
                @if let Some(count) = banner.pending_delete {
                    (delete_confirmation(count))
                }
                div class="mt-6 overflow-x-auto bg-white shadow rounded-lg" {
                    table class="min-w-full divide-y divide-gray-200 text-sm" {
                        thead class="bg-gray-50" {
                            tr {
                                th class="px-3 py-2" {}
                                @for header in panel.headers() {
                                    th class="px-3 py-2 text-left font-semibold text-gray-700" { (header) }
                                }
                                th class="px-3 py-2 text-left font-semibold text-gray-700" { (DETAIL_HEADER) }
                            }
                        }
                        tbody class="divide-y divide-gray-100" {
                            @if rows.is_empty() {
                                tr {
                                    td class="px-3 py-6 text-center text-gray-500" colspan=(panel.headers().len() + 2) {
                                        "No records."
                                    }
                                }
                            }
                            @for (index, row) in rows.iter().enumerate() {
                                tr class=(if row.checked { "bg-blue-50" } else { "" }) {
                                    td class="px-3 py-2" {
                                        form method="post" action=(format!("/toggle/{index}")) {
                                            input type="checkbox" checked[row.checked] disabled[!row.selectable] onchange="this.form.submit()";
                                        }
                                    }
                                    @for cell in &row.cells {
                                        td class="px-3 py-2 text-gray-800" { (cell) }
                                    }
                                    td class="px-3 py-2 space-x-3" {
                                        a class="text-blue-600 hover:text-blue-800" href=(format!("/detail/{index}")) { "View" }
                                        @if row.selectable {
                                            a class="text-blue-600 hover:text-blue-800" href=(format!("/edit/{index}")) { "Edit" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                (status_line(banner.status))
            }
        },
    )
}

/// Whether a form adds a record or rewrites an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    New,
    /// Key fields are shown but cannot be changed.
    Edit(&'static [&'static str]),
}

impl FormMode {
    fn heading(self) -> &'static str {
        match self {
            FormMode::New => "New record · ",
            FormMode::Edit(_) => "Edit record · ",
        }
    }

    fn action(self) -> &'static str {
        match self {
            FormMode::New => "/new",
            FormMode::Edit(_) => "/edit",
        }
    }

    fn locks(self, field: &str) -> bool {
        match self {
            FormMode::New => false,
            FormMode::Edit(locked) => locked.iter().any(|name| *name == field),
        }
    }
}

pub fn form_page(
    mode: FormMode,
    title: &str,
    fields: &[FieldSpec],
    values: &FormValues,
    error: Option<&str>,
) -> String {
    page(
        title,
        html! {
            div class="max-w-2xl mx-auto px-6 py-10" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { (mode.heading()) (title) }
                    (error_banner(error))
                    form class="mt-6 space-y-4" method="post" action=(mode.action()) {
                        @for field in fields {
                            (form_field(field, values, mode.locks(field.name)))
                        }
                        div class="flex gap-2 pt-2" {
                            button class=(BUTTON) type="submit" { "Save" }
                            a class=(BUTTON_QUIET) href="/" { "Cancel" }
                        }
                    }
                }
            }
        },
    )
}

pub fn detail_page(detail: &Detail) -> String {
    page(
        detail.title,
        html! {
            div class="max-w-2xl mx-auto px-6 py-10" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { "Record detail · " (detail.title) }
                    dl class="mt-6 divide-y divide-gray-100" {
                        @for (label, value) in &detail.fields {
                            div class="grid grid-cols-3 gap-4 py-2" {
                                dt class="text-sm font-medium text-gray-500" { (label) }
                                dd class="col-span-2 text-sm text-gray-900 whitespace-pre-wrap" { (value) }
                            }
                        }
                    }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Close" }
                }
            }
        },
    )
}

pub fn goodbye_page() -> String {
    page(
        APP_TITLE,
        html! {
            div class="min-h-screen flex items-center justify-center" {
                p class="text-gray-600" { "The application has been closed." }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn error_banner(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            div class="mt-6 rounded-md border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-800" role="alert" {
                (message)
            }
        }
    }
}

fn status_line(status: &str) -> Markup {
    html! { p class="mt-6 text-xs text-gray-500" { (status) } }
}

fn delete_confirmation(count: usize) -> Markup {
    html! {
        div class="mt-6 flex items-center justify-between rounded-md border border-amber-200 bg-amber-50 px-4 py-3" role="dialog" {
            p class="text-sm text-amber-900" { "Delete " (count) " selected record(s)? This cannot be undone." }
            div class="flex gap-2" {
                form method="post" action="/delete/confirm" { button class=(BUTTON_DANGER) type="submit" { "Yes" } }
                form method="post" action="/delete/cancel" { button class=(BUTTON_QUIET) type="submit" { "No" } }
            }
        }
    }
}

fn form_field(field: &FieldSpec, values: &FormValues, locked: bool) -> Markup {
    let submitted = values.get(field.name);
    let value = if submitted.is_empty() { field.default } else { submitted };

    let input = match field.kind {
        FieldKind::LongText => html! {
            textarea class=(INPUT) name=(field.name) id=(field.name) rows="3" placeholder=(field.placeholder) required[field.required] readonly[locked] { (value) }
        },
        FieldKind::Choice(options) => html! {
            select class=(INPUT) name=(field.name) id=(field.name) {
                @for choice in options {
                    option value=(choice) selected[*choice == value] disabled[locked && *choice != value] { (choice) }
                }
            }
        },
        FieldKind::Integer { min, max } => html! {
            input class=(INPUT) type="number" name=(field.name) id=(field.name) min=(min) max=(max) step="1" value=(value) placeholder=(field.placeholder) required[field.required] readonly[locked];
        },
        kind => {
            let (input_type, step) = match kind {
                FieldKind::Email => ("email", None),
                FieldKind::Decimal => ("number", Some("any")),
                FieldKind::Date => ("date", None),
                FieldKind::Time => ("time", None),
                _ => ("text", None),
            };
            html! {
                input class=(INPUT) type=(input_type) step=[step] name=(field.name) id=(field.name) value=(value) placeholder=(field.placeholder) required[field.required] readonly[locked];
            }
        },
    };

    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(field.name) {
                (field.label)
                @if field.required { span class="text-red-600" { " *" } }
            }
            (input)
        }
    }
}
