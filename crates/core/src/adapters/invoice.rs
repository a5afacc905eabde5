//! Invoice adapters: issuance and payment.

use rust_decimal::Decimal;
use tally_shared::types::AccountId;
use uuid::Uuid;

use crate::ledger::LineInput;

/// Snapshot of an invoice at issuance time.
#[derive(Debug, Clone)]
pub struct InvoiceSnapshot {
    /// The invoice's own identifier.
    pub invoice_id: Uuid,
    /// Invoice number for line descriptions.
    pub number: String,
    /// Pre-tax subtotal.
    pub subtotal: Decimal,
    /// Tax charged.
    pub tax: Decimal,
    /// Accounts-receivable account.
    pub receivable_account: AccountId,
    /// Revenue account.
    pub revenue_account: AccountId,
    /// Tax-payable account.
    pub tax_account: AccountId,
}

/// Snapshot of a payment applied to an invoice.
#[derive(Debug, Clone)]
pub struct InvoicePaymentSnapshot {
    /// The payment's own identifier.
    pub payment_id: Uuid,
    /// Invoice number for line descriptions.
    pub invoice_number: String,
    /// Amount received.
    pub amount: Decimal,
    /// Cash or bank account the money landed in.
    pub deposit_account: AccountId,
    /// Accounts-receivable account.
    pub receivable_account: AccountId,
}

/// Builds the lines for an invoice issuance.
///
/// Debit AR for the total, credit Revenue for the subtotal, credit
/// Tax-Payable for the tax (omitted when zero). Balanced by construction:
/// the debit is the sum of the credits.
#[must_use]
pub fn invoice_issuance_lines(snapshot: &InvoiceSnapshot) -> Vec<LineInput> {
    let total = snapshot.subtotal + snapshot.tax;
    let mut lines = vec![
        LineInput::debit(snapshot.receivable_account, total)
            .with_description(format!("Invoice {}", snapshot.number)),
        LineInput::credit(snapshot.revenue_account, snapshot.subtotal)
            .with_description(format!("Revenue for invoice {}", snapshot.number)),
    ];
    if snapshot.tax > Decimal::ZERO {
        lines.push(
            LineInput::credit(snapshot.tax_account, snapshot.tax)
                .with_description(format!("Tax on invoice {}", snapshot.number)),
        );
    }
    lines
}

/// Builds the lines for a customer payment against an invoice.
#[must_use]
pub fn invoice_payment_lines(snapshot: &InvoicePaymentSnapshot) -> Vec<LineInput> {
    vec![
        LineInput::debit(snapshot.deposit_account, snapshot.amount)
            .with_description(format!("Payment for invoice {}", snapshot.invoice_number)),
        LineInput::credit(snapshot.receivable_account, snapshot.amount)
            .with_description(format!("Payment for invoice {}", snapshot.invoice_number)),
    ]
}
