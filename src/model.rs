/// Text bound to every tax entry of a line item in place of the real figure.
pub const TAX_PLACEHOLDER: &str = "Informação de imposto";

/// Insertion-ordered list of named fields.
///
/// Keys are XML local names. Inserting a key that already exists replaces the
/// value but keeps the key at its original position.
#[derive(Clone, Debug, PartialEq)]
pub struct Fields<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for Fields<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> Fields<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Fields<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

pub type Address = Fields<String>;

#[derive(Clone, Debug, PartialEq)]
pub enum PartyField {
    Text(String),
    Address(Address),
}

impl PartyField {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PartyField::Text(s) => Some(s),
            PartyField::Address(_) => None,
        }
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            PartyField::Address(a) => Some(a),
            PartyField::Text(_) => None,
        }
    }
}

/// Issuer (`emit`) or recipient (`dest`) section.
pub type Party = Fields<PartyField>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineItem {
    /// Children of `prod`, verbatim.
    pub product: Fields<String>,
    /// Children of `imposto`, each bound to [`TAX_PLACEHOLDER`].
    pub taxes: Fields<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvoiceDocument {
    pub issuer: Option<Party>,
    pub recipient: Option<Party>,
    pub items: Vec<LineItem>,
}

impl InvoiceDocument {
    /// Sections in render order, paired with their XML local name.
    pub fn parties(&self) -> impl Iterator<Item = (&'static str, &Party)> {
        [("emit", &self.issuer), ("dest", &self.recipient)]
            .into_iter()
            .filter_map(|(name, party)| party.as_ref().map(|p| (name, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.issuer.is_none() && self.recipient.is_none() && self.items.is_empty()
    }
}
