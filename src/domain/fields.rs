// src/domain/fields.rs

/// How a column's values are parsed from user input and bound to SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
    Text,
    Boolean,
}

/// A searchable column of the `Property` table and how to ask for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub label: &'static str,
    /// Operator hint shown after the label.
    pub example: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    const fn new(
        label: &'static str,
        example: &'static str,
        column: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            label,
            example,
            column,
            kind,
        }
    }

    /// The line printed before reading this field's filter.
    pub fn prompt(&self) -> String {
        format!("Filter by {} ({}) (or leave blank): ", self.label, self.example)
    }
}

pub const PROPERTY_TABLE: &str = "Property";

/// Every searchable field, in prompt order. This is also the SELECT projection.
pub const FIELDS: [FieldDescriptor; 11] = [
    FieldDescriptor::new("Square Footage", "e.g., > 1000", "SquareFootage", FieldKind::Integer),
    FieldDescriptor::new("Lighting", "low|medium|high, e.g., = 'low'", "Lighting", FieldKind::Text),
    FieldDescriptor::new("Price", "e.g., < 500000", "Price", FieldKind::Decimal),
    FieldDescriptor::new("Rooms", "e.g., >= 3", "Rooms", FieldKind::Integer),
    FieldDescriptor::new("Bathrooms", "e.g., = 2", "Bathrooms", FieldKind::Integer),
    FieldDescriptor::new("Latitude", "e.g., > 40.5", "Latitude", FieldKind::Decimal),
    FieldDescriptor::new("Longitude", "e.g., < -73.9", "Longitude", FieldKind::Decimal),
    FieldDescriptor::new("Description", "e.g., LIKE '%garden%'", "Description", FieldKind::Text),
    FieldDescriptor::new("Yard", "yes: = true / no: = false", "Yard", FieldKind::Boolean),
    FieldDescriptor::new("Garage", "yes: = true / no: = false", "Garage", FieldKind::Boolean),
    FieldDescriptor::new("Pool", "yes: = true / no: = false", "Pool", FieldKind::Boolean),
];

/// Looks up a descriptor by its column name.
pub fn field_by_column(column: &str) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|f| f.column == column)
}
