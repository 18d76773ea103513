//! Database drivers and the `db.go` preamble each one needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The Go database driver the generated package targets.
///
/// Deserializing goes through [`FromStr`], so config files accept the same
/// case-insensitive names and aliases as the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Driver {
    /// `database/sql` with `github.com/mattn/go-sqlite3`.
    #[serde(rename = "sqlite3")]
    Sqlite3,
    /// `github.com/jackc/pgx/v5` through a `pgxpool.Pool`.
    #[serde(rename = "postgres")]
    Postgres,
}

impl Driver {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite3 => "sqlite3",
            Self::Postgres => "postgres",
        }
    }

    /// Import specs of the preamble, already quoted.
    pub(crate) fn imports(self) -> &'static [&'static str] {
        match self {
            Self::Sqlite3 => &[
                "\"context\"",
                "\"database/sql\"",
                "",
                "_ \"github.com/mattn/go-sqlite3\"",
            ],
            Self::Postgres => &[
                "\"context\"",
                "",
                "\"github.com/jackc/pgx/v5\"",
                "\"github.com/jackc/pgx/v5/pgxpool\"",
            ],
        }
    }

    /// The adapter wrapping the driver's handle into a `DBX`.
    pub(crate) fn adapter(self) -> &'static str {
        match self {
            Self::Sqlite3 => SQLITE3_ADAPTER,
            Self::Postgres => POSTGRES_ADAPTER,
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite3" | "sqlite" => Ok(Self::Sqlite3),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(Error::UnsupportedDriver(s.to_string())),
        }
    }
}

impl TryFrom<String> for Driver {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Driver-independent part of `db.go`.
pub(crate) const COMMON_PREAMBLE: &str = "\
type Row interface {
\tScan(dest ...any) error
}

type Rows interface {
\tNext() bool
\tScan(dest ...any) error
\tErr() error
\tClose() error
}

type DBX interface {
\tExec(ctx context.Context, query string, args ...any) error
\tQuery(ctx context.Context, query string, args ...any) (Rows, error)
\tQueryRow(ctx context.Context, query string, args ...any) Row
}

type Queries struct {
\tdb DBX
}

func New(db DBX) *Queries {
\treturn &Queries{db: db}
}
";

const SQLITE3_ADAPTER: &str = "\
type sqlDB struct {
\tdb *sql.DB
}

func NewFromDB(db *sql.DB) *Queries {
\treturn New(&sqlDB{db: db})
}

func (s *sqlDB) Exec(ctx context.Context, query string, args ...any) error {
\t_, err := s.db.ExecContext(ctx, query, args...)
\treturn err
}

func (s *sqlDB) Query(ctx context.Context, query string, args ...any) (Rows, error) {
\trows, err := s.db.QueryContext(ctx, query, args...)
\tif err != nil {
\t\treturn nil, err
\t}
\treturn rows, nil
}

func (s *sqlDB) QueryRow(ctx context.Context, query string, args ...any) Row {
\treturn s.db.QueryRowContext(ctx, query, args...)
}
";

const POSTGRES_ADAPTER: &str = "\
type pgxDB struct {
\tpool *pgxpool.Pool
}

func NewFromPool(pool *pgxpool.Pool) *Queries {
\treturn New(&pgxDB{pool: pool})
}

func (p *pgxDB) Exec(ctx context.Context, query string, args ...any) error {
\t_, err := p.pool.Exec(ctx, query, args...)
\treturn err
}

func (p *pgxDB) Query(ctx context.Context, query string, args ...any) (Rows, error) {
\trows, err := p.pool.Query(ctx, query, args...)
\tif err != nil {
\t\treturn nil, err
\t}
\treturn pgxRows{rows}, nil
}

func (p *pgxDB) QueryRow(ctx context.Context, query string, args ...any) Row {
\treturn p.pool.QueryRow(ctx, query, args...)
}

type pgxRows struct {
\tpgx.Rows
}

func (r pgxRows) Close() error {
\tr.Rows.Close()
\treturn nil
}
";
