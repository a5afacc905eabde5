//! Initial database migration.
//!
//! Creates the bookkeeping schema: enums, chart of accounts, fiscal periods,
//! the journal (entries + lines), the balance cache, inventory cost layers,
//! depreciation schedules, and the triggers that keep posted rows immutable.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS & FISCAL PERIODS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(FISCAL_PERIODS_SQL).await?;

        // ============================================================
        // PART 3: JOURNAL
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;
        db.execute_unprepared(ACCOUNT_BALANCES_SQL).await?;

        // ============================================================
        // PART 4: INVENTORY & FIXED ASSETS
        // ============================================================
        db.execute_unprepared(INVENTORY_COST_LAYERS_SQL).await?;
        db.execute_unprepared(DEPRECIATION_SCHEDULES_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account types
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'revenue',
    'expense'
);

-- Account subtypes for report grouping
CREATE TYPE account_subtype AS ENUM (
    'cash',
    'bank',
    'accounts_receivable',
    'inventory',
    'fixed_asset',
    'accumulated_depreciation',
    'other_asset',
    'accounts_payable',
    'tax_payable',
    'other_liability',
    'owner_equity',
    'retained_earnings',
    'operating_revenue',
    'other_revenue',
    'cost_of_goods_sold',
    'operating_expense',
    'depreciation_expense',
    'other_expense'
);

-- Journal entry status
CREATE TYPE entry_status AS ENUM ('draft', 'posted', 'void');

-- Source document types (posting idempotency key, together with the id)
CREATE TYPE source_document_type AS ENUM (
    'invoice',
    'invoice_payment',
    'bill',
    'expense',
    'depreciation_run',
    'inventory_issue'
);

-- Fiscal period status
CREATE TYPE fiscal_period_status AS ENUM ('open', 'closed');

-- Depreciation methods
CREATE TYPE depreciation_method AS ENUM (
    'straight_line',
    'declining_balance',
    'double_declining',
    'units_of_production'
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    account_subtype account_subtype,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_accounts_type ON accounts(account_type);
";

const FISCAL_PERIODS_SQL: &str = r"
CREATE TABLE fiscal_periods (
    id UUID PRIMARY KEY,
    name VARCHAR(20) NOT NULL UNIQUE,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    status fiscal_period_status NOT NULL DEFAULT 'open',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_period_dates CHECK (start_date <= end_date)
);

CREATE INDEX idx_fiscal_periods_dates ON fiscal_periods(start_date, end_date);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    reference VARCHAR(100),
    status entry_status NOT NULL DEFAULT 'draft',
    source_document_type source_document_type,
    source_document_id UUID,
    reverses_entry_id UUID REFERENCES journal_entries(id),
    created_by UUID NOT NULL,
    posted_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_source_document CHECK (
        (source_document_type IS NULL) = (source_document_id IS NULL)
    )
);

CREATE INDEX idx_journal_entries_date ON journal_entries(entry_date);
CREATE INDEX idx_journal_entries_status ON journal_entries(status);

-- At most one journal entry per source document
CREATE UNIQUE INDEX uq_journal_entries_source
    ON journal_entries(source_document_type, source_document_id)
    WHERE source_document_id IS NOT NULL;

-- At most one reversal per entry
CREATE UNIQUE INDEX uq_journal_entries_reverses
    ON journal_entries(reverses_entry_id)
    WHERE reverses_entry_id IS NOT NULL;
";

const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id UUID PRIMARY KEY,
    entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    line_number INTEGER NOT NULL,
    account_id UUID NOT NULL REFERENCES accounts(id),
    debit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    credit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_journal_lines_number UNIQUE (entry_id, line_number),
    CONSTRAINT chk_line_amounts CHECK (
        (debit > 0 AND credit = 0) OR (credit > 0 AND debit = 0)
    )
);

CREATE INDEX idx_journal_lines_entry ON journal_lines(entry_id);
CREATE INDEX idx_journal_lines_account ON journal_lines(account_id);
";

const ACCOUNT_BALANCES_SQL: &str = r"
CREATE TABLE account_balances (
    account_id UUID PRIMARY KEY REFERENCES accounts(id),
    debit_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    credit_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    version BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const INVENTORY_COST_LAYERS_SQL: &str = r"
CREATE TABLE inventory_cost_layers (
    id UUID PRIMARY KEY,
    product_id UUID NOT NULL,
    source_entry_id UUID REFERENCES journal_entries(id),
    received_date DATE NOT NULL,
    quantity NUMERIC(19, 4) NOT NULL,
    remaining_quantity NUMERIC(19, 4) NOT NULL,
    unit_cost NUMERIC(19, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_layer_quantity CHECK (quantity > 0),
    CONSTRAINT chk_layer_remaining CHECK (
        remaining_quantity >= 0 AND remaining_quantity <= quantity
    ),
    CONSTRAINT chk_layer_cost CHECK (unit_cost >= 0)
);

CREATE INDEX idx_cost_layers_product ON inventory_cost_layers(product_id, received_date);
";

const DEPRECIATION_SCHEDULES_SQL: &str = r"
CREATE TABLE depreciation_schedules (
    id UUID PRIMARY KEY,
    asset_id UUID NOT NULL UNIQUE,
    asset_name VARCHAR(255) NOT NULL,
    method depreciation_method NOT NULL,
    cost NUMERIC(19, 4) NOT NULL,
    residual_value NUMERIC(19, 4) NOT NULL DEFAULT 0,
    life_periods INTEGER NOT NULL,
    start_date DATE NOT NULL,
    total_units NUMERIC(19, 4),
    usage_units JSONB,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_schedule_life CHECK (life_periods > 0),
    CONSTRAINT chk_schedule_amounts CHECK (
        cost > 0 AND residual_value >= 0 AND residual_value < cost
    )
);
";

const TRIGGERS_SQL: &str = r"
-- Keep updated_at current
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_accounts_updated_at
    BEFORE UPDATE ON accounts
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_fiscal_periods_updated_at
    BEFORE UPDATE ON fiscal_periods
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_journal_entries_updated_at
    BEFORE UPDATE ON journal_entries
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_cost_layers_updated_at
    BEFORE UPDATE ON inventory_cost_layers
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_depreciation_updated_at
    BEFORE UPDATE ON depreciation_schedules
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

-- Posted entries are immutable except for the posted -> void transition.
-- Void entries never change again. Draft entries may not be deleted once
-- posted.
CREATE OR REPLACE FUNCTION enforce_entry_immutability()
RETURNS TRIGGER AS $$
BEGIN
    IF TG_OP = 'DELETE' THEN
        IF OLD.status <> 'draft' THEN
            RAISE EXCEPTION 'journal entry % is % and cannot be deleted',
                OLD.id, OLD.status;
        END IF;
        RETURN OLD;
    END IF;

    IF OLD.status = 'void' THEN
        RAISE EXCEPTION 'journal entry % is void and immutable', OLD.id;
    END IF;

    IF OLD.status = 'posted' THEN
        IF NEW.status <> 'void'
            OR NEW.entry_date <> OLD.entry_date
            OR NEW.description <> OLD.description
            OR NEW.created_by <> OLD.created_by
        THEN
            RAISE EXCEPTION 'journal entry % is posted; only a void transition is allowed',
                OLD.id;
        END IF;
    END IF;

    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_journal_entries_immutable
    BEFORE UPDATE OR DELETE ON journal_entries
    FOR EACH ROW EXECUTE FUNCTION enforce_entry_immutability();

-- Lines of a non-draft entry are write-once
CREATE OR REPLACE FUNCTION enforce_line_immutability()
RETURNS TRIGGER AS $$
DECLARE
    owning_status entry_status;
BEGIN
    SELECT status INTO owning_status
    FROM journal_entries
    WHERE id = OLD.entry_id;

    IF owning_status IS NOT NULL AND owning_status <> 'draft' THEN
        RAISE EXCEPTION 'journal lines of entry % are immutable (status %)',
            OLD.entry_id, owning_status;
    END IF;

    IF TG_OP = 'DELETE' THEN
        RETURN OLD;
    END IF;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_journal_lines_immutable
    BEFORE UPDATE OR DELETE ON journal_lines
    FOR EACH ROW EXECUTE FUNCTION enforce_line_immutability();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS depreciation_schedules CASCADE;
DROP TABLE IF EXISTS inventory_cost_layers CASCADE;
DROP TABLE IF EXISTS account_balances CASCADE;
DROP TABLE IF EXISTS journal_lines CASCADE;
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP TABLE IF EXISTS fiscal_periods CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;

DROP FUNCTION IF EXISTS enforce_line_immutability CASCADE;
DROP FUNCTION IF EXISTS enforce_entry_immutability CASCADE;
DROP FUNCTION IF EXISTS set_updated_at CASCADE;

DROP TYPE IF EXISTS depreciation_method;
DROP TYPE IF EXISTS fiscal_period_status;
DROP TYPE IF EXISTS source_document_type;
DROP TYPE IF EXISTS entry_status;
DROP TYPE IF EXISTS account_subtype;
DROP TYPE IF EXISTS account_type;
";
