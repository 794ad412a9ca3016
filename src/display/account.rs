//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.
//! Credentials are never rendered.

use crate::models::{Account, Money};

/// Format a list of accounts as a table with a total row
pub fn format_account_list(accounts: &[Account], currency: &str) -> String {
    if accounts.is_empty() {
        return "No active accounts to show.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.holder_name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let balances: Vec<String> = accounts
        .iter()
        .map(|a| a.balance.format_with_symbol(currency))
        .collect();
    let total: i128 = accounts.iter().map(|a| i128::from(a.balance.cents())).sum();
    let total = format_total(total, currency);

    let balance_width = balances
        .iter()
        .chain(std::iter::once(&total))
        .map(|b| b.chars().count())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<name_width$}  {:>balance_width$}\n",
        "AccNo", "Name", "Balance",
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<name_width$}  {:->balance_width$}\n",
        "", "", "",
    ));

    for (account, balance) in accounts.iter().zip(&balances) {
        output.push_str(&format!(
            "{:<8}  {:<name_width$}  {:>balance_width$}\n",
            account.number.to_string(),
            account.holder_name,
            balance,
        ));
    }

    output.push_str(&format!(
        "{:-<8}  {:-<name_width$}  {:->balance_width$}\n",
        "", "", "",
    ));
    output.push_str(&format!(
        "{:<8}  {:<name_width$}  {:>balance_width$}\n",
        "TOTAL", "", total,
    ));

    output
}

/// Format a sum of balances, which may exceed the range of one `Money`
fn format_total(cents: i128, currency: &str) -> String {
    match i64::try_from(cents) {
        Ok(cents) => Money::from_cents(cents).format_with_symbol(currency),
        Err(_) => {
            let sign = if cents < 0 { "-" } else { "" };
            let abs = cents.unsigned_abs();
            format!("{}{}{}.{:02}", sign, currency, abs / 100, abs % 100)
        }
    }
}

/// Format a single account's details
pub fn format_account_details(account: &Account, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account No: {}\n", account.number));
    output.push_str(&format!("Name:       {}\n", account.holder_name));
    output.push_str(&format!(
        "Balance:    {}\n",
        account.balance.format_with_symbol(currency)
    ));

    output
}
