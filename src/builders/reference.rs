//! Refs from free text and from fields.

use crate::builders::entry::EntryBuilder;
use crate::datetime::{DateContext, DateTimeParser};
use crate::element_type::ElementType;
use crate::error::{Result, XobisError};
use crate::indexer::{authorized_form, identity_subfields, IdentityKind, Indexer};
use crate::name_parser::{trim_name, NameParser};
use crate::record::Field;
use crate::tables::link_code;
use crate::xobis::{LinkAttributes, NameContent, Ref};

/// A ref from a bare string: the text is the name and the title, the href
/// comes from the index.
///
/// Time text is parsed as a date instead.
///
/// # Errors
///
/// Returns [`XobisError::Invariant`] for blank text and
/// [`XobisError::InvalidDate`] for unparsable time text.
pub fn build_simple_ref(text: &str, element_type: ElementType, indexer: &Indexer) -> Result<Ref> {
    let text = text.trim();
    if text.is_empty() {
        return Err(XobisError::Invariant(format!("blank {element_type} ref")));
    }
    if element_type == ElementType::Time {
        let time = DateTimeParser::with_indexer(indexer).parse(text, DateContext::General)?;
        return Ok(Ref::from(time));
    }
    let mut entry = EntryBuilder::new(element_type);
    entry.add_name(NameContent::new(text), None)?;
    let href = indexer.simple_lookup(text, Some(element_type));
    entry.build_ref(Some(LinkAttributes::new(text, Some(href))))
}

/// Link attributes for the entity a field names.
///
/// The href is the field's link subfield (`$w` or `$0`) when it carries one
/// of this institution's control numbers, otherwise the index lookup. The
/// title is the authorized form of the field's identity subfields.
#[must_use]
pub fn field_link(field: &Field, element_type: ElementType, parser: &NameParser<'_>) -> LinkAttributes {
    let explicit = link_code(&field.tag).and_then(|code| {
        field
            .get_subfield_values(code)
            .into_iter()
            .map(str::trim)
            .find(|value| parser.config().is_local_control_number(value))
    });
    let href = match explicit {
        Some(value) => value.to_string(),
        None => parser.indexer().lookup(field, element_type),
    };
    let title = IdentityKind::for_element(element_type)
        .first()
        .map(|kind| authorized_form(&identity_subfields(field, *kind)))
        .filter(|form| !form.is_empty())
        .unwrap_or_else(|| field.value());
    LinkAttributes::new(trim_name(&title), Some(href))
}

/// A linked ref to the entity a field names, with the parser's warnings.
///
/// # Errors
///
/// Returns [`XobisError::MalformedField`] when the field names nothing, and
/// fails as [`EntryBuilder`] does when the items do not fit `element_type`.
pub fn build_ref_from_field(
    field: &Field,
    element_type: ElementType,
    parser: &NameParser<'_>,
) -> Result<(Ref, Vec<XobisError>)> {
    let parsed = parser.parse(field, element_type);
    if !parsed.has_name() {
        return Err(XobisError::malformed(
            &field.tag,
            format!("no {element_type} name to link to"),
        ));
    }
    let mut entry = EntryBuilder::new(element_type);
    entry.add_items(parsed.items)?;
    let reference = entry.build_ref(Some(field_link(field, element_type, parser)))?;
    Ok((reference, parsed.warnings))
}
