//! Helpers for type reference strings such as `User`, `ID!` or `[Post!]!`

/// The outermost wrapper of a type reference, with non-null markers removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeReference<'a> {
    /// A named type
    Named(&'a str),
    /// A list; holds the reference of the item type
    List(&'a str),
}

impl<'a> TypeReference<'a> {
    pub fn parse(type_ref: &'a str) -> Self {
        let unwrapped = type_ref.trim().trim_end_matches('!').trim_end();
        match unwrapped
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            Some(item) => TypeReference::List(item.trim()),
            None => TypeReference::Named(unwrapped),
        }
    }
}

/// The innermost named type of a reference
pub fn base_name(type_ref: &str) -> &str {
    let mut current = type_ref;
    loop {
        match TypeReference::parse(current) {
            TypeReference::Named(name) => return name,
            TypeReference::List(item) => current = item,
        }
    }
}

/// Whether the outermost wrapper is non-null
pub fn is_required(type_ref: &str) -> bool {
    type_ref.trim_end().ends_with('!')
}

/// Whether the reference is a list once the outer non-null marker is removed
pub fn is_list(type_ref: &str) -> bool {
    matches!(TypeReference::parse(type_ref), TypeReference::List(_))
}
