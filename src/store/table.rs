use std::fmt;

/// Logical tables kept by the record store. Both share the `UserRecord` schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Audit,
}

impl Table {
    pub const ALL: [Table; 2] = [Table::Users, Table::Audit];

    pub fn as_str(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Audit => "audit",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
