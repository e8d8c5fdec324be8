//! HTML rendering for the page routes. Pages are assembled with
//! `format!` around one shared layout; every interpolated user value
//! goes through `escape`.

use axum::response::Html;

use crate::services::TransactionSummary;
use crate::store::{TransactionRecord, UserAccount};

/// Minimal HTML escaping for interpolated text.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>CloudBankX - {title}</title></head>
<body>
<nav>
  <a href="/home">Home</a> |
  <a href="/dashboard">Dashboard</a> |
  <a href="/personal-banking">Personal Banking</a> |
  <a href="/transactions">Transactions</a> |
  <a href="/corporate">Corporate</a> |
  <a href="/nri">NRI</a> |
  <a href="/contact">Contact</a> |
  <a href="/logout">Logout</a>
</nav>
<hr>
{body}
</body>
</html>"#
    ))
}

pub fn login_page() -> Html<String> {
    layout(
        "Login",
        r#"<h1>Welcome to CloudBankX</h1>
<form method="post" action="/login">
  <input name="username" placeholder="Username" required>
  <input name="password" type="password" placeholder="Password" required>
  <button type="submit">Login</button>
</form>
<p>New customer? <a href="/signup">Open an account</a></p>"#,
    )
}

pub fn home_page(user: Option<&str>) -> Html<String> {
    let greeting = match user {
        Some(name) => format!("<p>Logged in as <b>{}</b>.</p>", escape(name)),
        None => "<p><a href=\"/\">Log in</a> to manage your account.</p>".to_string(),
    };
    layout("Home", &format!("<h1>CloudBankX</h1>{greeting}"))
}

pub fn signup_page() -> Html<String> {
    layout(
        "Sign Up",
        r#"<h1>Open an Account</h1>
<form method="post" action="/signup">
  <input name="username" placeholder="Username" required>
  <input name="password" type="password" placeholder="Password" required>
  <input name="confirm_password" type="password" placeholder="Confirm password" required>
  <button type="submit">Sign Up</button>
</form>"#,
    )
}

pub fn dashboard_page(account: &UserAccount) -> Html<String> {
    let body = format!(
        r#"<h1>Account Profile</h1>
<table>
  <tr><td>Name</td><td>{name}</td></tr>
  <tr><td>Account Number</td><td>{number}</td></tr>
  <tr><td>Account Type</td><td>{kind}</td></tr>
  <tr><td>Branch</td><td>{branch}</td></tr>
  <tr><td>IFSC</td><td>{ifsc}</td></tr>
  <tr><td>Balance</td><td>{balance:.2}</td></tr>
</table>"#,
        name = escape(&account.name),
        number = account.account_number,
        kind = escape(&account.account_type),
        branch = escape(&account.branch),
        ifsc = escape(&account.ifsc),
        balance = account.balance,
    );
    layout("Dashboard", &body)
}

fn transaction_rows(transactions: &[TransactionRecord]) -> String {
    if transactions.is_empty() {
        return "<tr><td colspan=\"4\">No transactions yet</td></tr>".to_string();
    }
    transactions
        .iter()
        .map(|t| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td></tr>",
                escape(&t.date),
                t.kind,
                t.amount,
                t.balance
            )
        })
        .collect()
}

pub fn personal_banking_page(
    user: &str,
    account: &UserAccount,
    summary: &TransactionSummary,
) -> Html<String> {
    let body = format!(
        r#"<h1>Personal Banking</h1>
<p>Hello, <b>{user}</b>. Current balance: <b>{balance:.2}</b></p>
<h2>Analytics</h2>
<ul>
  <li>Total deposits: {deposits:.2}</li>
  <li>Total withdrawals: {withdrawals:.2}</li>
  <li>Net change: {net:.2}</li>
</ul>
<h2>Deposit</h2>
<form method="post" action="/deposit">
  <input name="amount" placeholder="Amount" required>
  <button type="submit">Deposit</button>
</form>
<h2>Withdraw</h2>
<form method="post" action="/withdraw">
  <input name="amount" placeholder="Amount" required>
  <button type="submit">Withdraw</button>
</form>
<h2>Transactions</h2>
<table>
  <tr><th>Date</th><th>Type</th><th>Amount</th><th>Balance</th></tr>
  {rows}
</table>"#,
        user = escape(user),
        balance = account.balance,
        deposits = summary.total_deposit,
        withdrawals = summary.total_withdraw,
        net = summary.net_change,
        rows = transaction_rows(&account.transactions),
    );
    layout("Personal Banking", &body)
}

pub fn transactions_page(user: &str, transactions: &[TransactionRecord]) -> Html<String> {
    let body = format!(
        r#"<h1>Transaction History</h1>
<p>Account holder: <b>{user}</b></p>
<table>
  <tr><th>Date</th><th>Type</th><th>Amount</th><th>Balance</th></tr>
  {rows}
</table>"#,
        user = escape(user),
        rows = transaction_rows(transactions),
    );
    layout("Transactions", &body)
}

pub fn corporate_page() -> Html<String> {
    layout(
        "Corporate Banking",
        "<h1>Corporate Banking</h1><p>Treasury, payroll and trade services for businesses.</p>",
    )
}

pub fn nri_page() -> Html<String> {
    layout(
        "NRI Banking",
        "<h1>NRI Banking</h1><p>Accounts and remittance services for non-resident customers.</p>",
    )
}

pub fn contact_page() -> Html<String> {
    layout(
        "Contact",
        "<h1>Contact Us</h1><p>CloudBankX Main Branch &middot; support@cloudbankx.example</p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn test_dashboard_escapes_username() {
        let mut account = UserAccount::new("safe");
        account.name = "<script>alert(1)</script>".to_string();
        let Html(page) = dashboard_page(&account);
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_transactions_page_handles_empty_log() {
        let Html(page) = transactions_page("alice", &[]);
        assert!(page.contains("No transactions yet"));
    }
}
