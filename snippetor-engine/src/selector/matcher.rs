//! Right-to-left selector matching over the rcdom tree.
//!
//! Matching starts at the rightmost compound (the candidate element itself) and
//! walks outwards through parents and preceding siblings, backtracking for the
//! descendant and subsequent-sibling combinators.

use super::{AttrOperator, Combinator, ComplexSelector, Compound, SimpleSelector};
use crate::dom;
use markup5ever_rcdom::Handle;

pub(super) fn matches_complex(selector: &ComplexSelector, element: &Handle) -> bool {
    match selector.compounds.len() {
        0 => false,
        len => matches_from(selector, len - 1, element),
    }
}

fn matches_from(selector: &ComplexSelector, index: usize, element: &Handle) -> bool {
    if !matches_compound(&selector.compounds[index], element) {
        return false;
    }
    if index == 0 {
        return true;
    }

    let next = index - 1;
    match selector.combinators[next] {
        Combinator::Child => dom::parent_element(element)
            .is_some_and(|parent| matches_from(selector, next, &parent)),
        Combinator::Descendant => {
            let mut current = dom::parent_element(element);
            while let Some(ancestor) = current {
                if matches_from(selector, next, &ancestor) {
                    return true;
                }
                current = dom::parent_element(&ancestor);
            }
            false
        }
        Combinator::NextSibling => dom::preceding_element_siblings(element)
            .first()
            .is_some_and(|sibling| matches_from(selector, next, sibling)),
        Combinator::SubsequentSibling => dom::preceding_element_siblings(element)
            .iter()
            .any(|sibling| matches_from(selector, next, sibling)),
    }
}

fn matches_compound(compound: &Compound, element: &Handle) -> bool {
    let Some(tag) = dom::tag_name(element) else {
        return false;
    };
    if let Some(expected) = &compound.tag {
        if !tag.eq_ignore_ascii_case(expected) {
            return false;
        }
    }
    compound
        .simple
        .iter()
        .all(|simple| matches_simple(simple, element))
}

fn matches_simple(simple: &SimpleSelector, element: &Handle) -> bool {
    match simple {
        SimpleSelector::Class(class) => dom::class_tokens(element).iter().any(|t| t == class),
        SimpleSelector::Id(id) => dom::attribute(element, "id").as_deref() == Some(id.as_str()),
        SimpleSelector::Attribute { name, test } => {
            let Some(actual) = dom::attribute(element, name) else {
                return false;
            };
            match test {
                None => true,
                Some((operator, expected)) => matches_attribute(*operator, &actual, expected),
            }
        }
    }
}

fn matches_attribute(operator: AttrOperator, actual: &str, expected: &str) -> bool {
    match operator {
        AttrOperator::Equals => actual == expected,
        AttrOperator::Includes => {
            !expected.is_empty() && actual.split_whitespace().any(|token| token == expected)
        }
        AttrOperator::DashMatch => {
            actual == expected
                || actual
                    .strip_prefix(expected)
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttrOperator::Prefix => !expected.is_empty() && actual.starts_with(expected),
        AttrOperator::Suffix => !expected.is_empty() && actual.ends_with(expected),
        AttrOperator::Substring => !expected.is_empty() && actual.contains(expected),
    }
}
