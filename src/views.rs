// src/views.rs
//
// Renderização HTML das duas telas: listagem e formulário (adicionar/editar).

use std::fmt::{self, Write};

use crate::{
    middleware::{flash::Notice, i18n::Locale},
    models::inventory::{InventoryItem, InventoryRow, ItemForm, ItemType},
};

#[derive(Debug, Clone, Copy)]
enum Label {
    Inventory,
    Name,
    Type,
    Quantity,
    Actions,
    Edit,
    Consume,
    Delete,
    AddItem,
    EditItem,
    Save,
    Back,
    Empty,
    NoType,
    ChooseType,
}

fn label(locale: Locale, key: Label) -> &'static str {
    match (locale, key) {
        (Locale::En, Label::Inventory) => "Inventory",
        (Locale::Fr, Label::Inventory) => "Inventaire",
        (Locale::En, Label::Name) => "Name",
        (Locale::Fr, Label::Name) => "Nom",
        (_, Label::Type) => "Type",
        (Locale::En, Label::Quantity) => "Quantity",
        (Locale::Fr, Label::Quantity) => "Quantité",
        (_, Label::Actions) => "Actions",
        (Locale::En, Label::Edit) => "Edit",
        (Locale::Fr, Label::Edit) => "Modifier",
        (Locale::En, Label::Consume) => "Consume",
        (Locale::Fr, Label::Consume) => "Consommer",
        (Locale::En, Label::Delete) => "Delete",
        (Locale::Fr, Label::Delete) => "Supprimer",
        (Locale::En, Label::AddItem) => "Add item",
        (Locale::Fr, Label::AddItem) => "Ajouter un objet",
        (Locale::En, Label::EditItem) => "Edit item",
        (Locale::Fr, Label::EditItem) => "Modifier l'objet",
        (Locale::En, Label::Save) => "Save",
        (Locale::Fr, Label::Save) => "Enregistrer",
        (Locale::En, Label::Back) => "Back",
        (Locale::Fr, Label::Back) => "Retour",
        (Locale::En, Label::Empty) => "No items yet.",
        (Locale::Fr, Label::Empty) => "Aucun objet pour le moment.",
        (Locale::En, Label::NoType) => "(no type)",
        (Locale::Fr, Label::NoType) => "(sans type)",
        (Locale::En, Label::ChooseType) => "Choose a type",
        (Locale::Fr, Label::ChooseType) => "Choisir un type",
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Página completa: cabeçalho, mensagem pendente e o corpo escrito por `body`.
fn page(
    locale: Locale,
    title: &str,
    notice: Option<Notice>,
    body: impl FnOnce(&mut String) -> fmt::Result,
) -> Result<String, fmt::Error> {
    let mut html = String::new();
    write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n",
        lang = locale.code(),
        title = escape(title),
    )?;
    if let Some(notice) = notice {
        writeln!(
            html,
            "<div class=\"alert alert-{}\" role=\"alert\">{}</div>",
            notice.category().as_str(),
            escape(notice.text(locale)),
        )?;
    }
    body(&mut html)?;
    html.push_str("</body>\n</html>\n");
    Ok(html)
}

// --- Listagem ---
pub fn inventory_page(
    locale: Locale,
    notice: Option<Notice>,
    items: &[InventoryRow],
) -> Result<String, fmt::Error> {
    page(locale, label(locale, Label::Inventory), notice, |out| {
        write_inventory(out, locale, items)
    })
}

fn write_inventory(out: &mut String, locale: Locale, items: &[InventoryRow]) -> fmt::Result {
    writeln!(out, "<p><a href=\"/add\">{}</a></p>", label(locale, Label::AddItem))?;

    if items.is_empty() {
        return writeln!(out, "<p>{}</p>", label(locale, Label::Empty));
    }

    writeln!(
        out,
        "<table>\n<thead><tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr></thead>\n<tbody>",
        label(locale, Label::Name),
        label(locale, Label::Type),
        label(locale, Label::Quantity),
        label(locale, Label::Actions),
    )?;
    for item in items {
        let type_name = item
            .item_type
            .as_deref()
            .map(escape)
            .unwrap_or_else(|| label(locale, Label::NoType).to_string());
        writeln!(
            out,
            "<tr><td>{name}</td><td>{type_name}</td><td>{qty}</td><td>\
             <a href=\"/edit/{id}\">{edit}</a> \
             <form method=\"post\" action=\"/consume/{id}\" style=\"display:inline\"><button type=\"submit\">{consume}</button></form> \
             <form method=\"post\" action=\"/delete/{id}\" style=\"display:inline\"><button type=\"submit\">{delete}</button></form>\
             </td></tr>",
            id = item.item_id,
            name = escape(&item.item_name),
            qty = item.item_quantity,
            edit = label(locale, Label::Edit),
            consume = label(locale, Label::Consume),
            delete = label(locale, Label::Delete),
        )?;
    }
    out.push_str("</tbody>\n</table>\n");
    Ok(())
}

// --- Formulário ---
#[derive(Debug, Clone, Copy)]
pub enum FormMode<'a> {
    Add,
    /// Edição: o objeto carregado do banco (o título usa o nome original).
    Edit(&'a InventoryItem),
}

pub struct FormView<'a> {
    pub mode: FormMode<'a>,
    /// Valores mostrados nos campos (os digitados, quando a validação falha).
    pub values: &'a ItemForm,
    pub item_types: &'a [ItemType],
    pub notice: Option<Notice>,
}

pub fn item_form_page(locale: Locale, view: &FormView<'_>) -> Result<String, fmt::Error> {
    let (title, action) = match view.mode {
        FormMode::Add => (label(locale, Label::AddItem).to_string(), "/add".to_string()),
        FormMode::Edit(item) => (
            format!("{} : {}", label(locale, Label::EditItem), item.name),
            format!("/edit/{}", item.id),
        ),
    };

    page(locale, &title, view.notice, |out| {
        write_item_form(out, locale, &action, view)
    })
}

fn write_item_form(
    out: &mut String,
    locale: Locale,
    action: &str,
    view: &FormView<'_>,
) -> fmt::Result {
    writeln!(out, "<form method=\"post\" action=\"{action}\">")?;
    writeln!(
        out,
        "<label>{} <input type=\"text\" name=\"name\" value=\"{}\" required></label>",
        label(locale, Label::Name),
        escape(&view.values.name),
    )?;

    writeln!(
        out,
        "<label>{} <select name=\"type_id\" required>\n<option value=\"\">{}</option>",
        label(locale, Label::Type),
        label(locale, Label::ChooseType),
    )?;
    for item_type in view.item_types {
        let id = item_type.id.to_string();
        let selected = if id == view.values.type_id { " selected" } else { "" };
        writeln!(
            out,
            "<option value=\"{id}\"{selected}>{}</option>",
            escape(&item_type.type_name),
        )?;
    }
    out.push_str("</select></label>\n");

    writeln!(
        out,
        "<label>{} <input type=\"number\" name=\"quantity\" min=\"0\" value=\"{}\" required></label>",
        label(locale, Label::Quantity),
        escape(&view.values.quantity),
    )?;
    writeln!(
        out,
        "<button type=\"submit\">{}</button>\n</form>\n<p><a href=\"/\">{}</a></p>",
        label(locale, Label::Save),
        label(locale, Label::Back),
    )
}
