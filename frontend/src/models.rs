use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::dates;
use crate::error::ValidationError;

/// A user reference that the backend sends either populated (`{ "name": .. }`)
/// or as a bare string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Populated {
        #[serde(default)]
        name: String,
    },
    Name(String),
}

impl UserRef {
    pub fn name(&self) -> &str {
        match self {
            UserRef::Populated { name } | UserRef::Name(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub account_no: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub total_days: Option<i64>,
    #[serde(default)]
    pub daily_collection: Option<f64>,
    #[serde(default)]
    pub total_amount_given: Option<f64>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub created_by_name: Option<String>,
}

impl Customer {
    pub fn created_by_label(&self) -> &str {
        self.created_by
            .as_ref()
            .map(UserRef::name)
            .or(self.created_by_name.as_deref())
            .unwrap_or("—")
    }

    /// Numeric part before the slash of `100/25`; malformed numbers sort last.
    pub fn account_sort_key(&self) -> u64 {
        self.account_no
            .split('/')
            .next()
            .and_then(|prefix| prefix.trim().parse().ok())
            .unwrap_or(u64::MAX)
    }
}

pub fn sort_by_account(customers: &mut [Customer]) {
    customers.sort_by_key(Customer::account_sort_key);
}

/// Inserts `customer` keeping the list ordered by account number.
pub fn insert_sorted(customers: &mut Vec<Customer>, customer: Customer) {
    let key = customer.account_sort_key();
    let at = customers.partition_point(|c| c.account_sort_key() <= key);
    customers.insert(at, customer);
}

/// Case-insensitive substring match on the customer name.
pub fn filter_by_name<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    let term = term.trim().to_lowercase();
    customers
        .iter()
        .filter(|c| term.is_empty() || c.name.to_lowercase().contains(&term))
        .collect()
}

/// `<digits>/<two digits>`, e.g. `100/25`.
pub fn is_valid_account_no(raw: &str) -> bool {
    let Some((number, year)) = raw.trim().split_once('/') else {
        return false;
    };
    !number.is_empty()
        && number.bytes().all(|b| b.is_ascii_digit())
        && year.len() == 2
        && year.bytes().all(|b| b.is_ascii_digit())
}

/// Body of `POST /customers` and `PUT /customers/:id`. Numbers stay as the
/// strings typed into the form; the backend casts them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    pub account_no: String,
    pub name: String,
    pub mobile: String,
    pub start_date: String,
    pub end_date: String,
    pub total_days: String,
    pub daily_collection: String,
    pub total_amount_given: String,
}

impl CustomerForm {
    /// Prefills the update form. Timestamps are cut to the `yyyy-mm-dd` an
    /// `<input type="date">` accepts.
    pub fn from_customer(customer: &Customer) -> Self {
        let date = |value: &Option<String>| {
            value
                .as_deref()
                .map(|raw| raw.get(..10).unwrap_or(raw).to_string())
                .unwrap_or_default()
        };
        let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        Self {
            account_no: customer.account_no.clone(),
            name: customer.name.clone(),
            mobile: customer.mobile.clone(),
            start_date: date(&customer.start_date),
            end_date: date(&customer.end_date),
            total_days: customer.total_days.map(|d| d.to_string()).unwrap_or_default(),
            daily_collection: number(customer.daily_collection),
            total_amount_given: number(customer.total_amount_given),
        }
    }

    /// `customer` with the submitted fields written over it, for when the
    /// backend does not echo the updated document.
    pub fn apply_to(&self, customer: &Customer) -> Customer {
        let text = |raw: &str| Some(raw.trim().to_string()).filter(|v| !v.is_empty());
        Customer {
            account_no: self.account_no.trim().to_string(),
            name: self.name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            start_date: text(&self.start_date),
            end_date: text(&self.end_date),
            total_days: self.total_days.trim().parse().ok(),
            daily_collection: self.daily_collection.trim().parse().ok(),
            total_amount_given: self.total_amount_given.trim().parse().ok(),
            ..customer.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.account_no.trim().is_empty() {
            return Err(ValidationError::new("Account number is required"));
        }
        if !is_valid_account_no(&self.account_no) {
            return Err(ValidationError::new(
                "Account number must be in format e.g., 100/25",
            ));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("Name is required"));
        }
        Ok(())
    }
}

/// Inline edit from the customer table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub account_no: String,
    pub name: String,
}

impl CustomerUpdate {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            account_no: customer.account_no.clone(),
            name: customer.name.clone(),
        }
    }

    pub fn trimmed(&self) -> Self {
        Self {
            account_no: self.account_no.trim().to_string(),
            name: self.name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub today_date: String,
    #[serde(default)]
    pub today_received_amount: f64,
    #[serde(default)]
    pub total_received_amount: Option<f64>,
    #[serde(default)]
    pub updated_by: Option<UserRef>,
    #[serde(default)]
    pub updated_by_name: Option<String>,
}

impl CustomerRecord {
    pub fn updated_by_label(&self) -> &str {
        self.updated_by
            .as_ref()
            .map(UserRef::name)
            .or(self.updated_by_name.as_deref())
            .unwrap_or("—")
    }
}

/// `GET /records/:customerId`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<CustomerRecord>,
    #[serde(default)]
    pub customer: Option<Customer>,
}

/// Rewrites `total_received_amount` as the running sum of received amounts,
/// in list order, and returns the grand total.
pub fn apply_running_totals(records: &mut [CustomerRecord]) -> f64 {
    records.iter_mut().fold(0.0, |running, record| {
        let running = running + record.today_received_amount;
        record.total_received_amount = Some(running);
        running
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub today_date: String,
    pub today_received_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAmountUpdate {
    pub today_received_amount: f64,
}

pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .ok_or_else(|| ValidationError::new("Amount must be a non-negative number"))
}

/// Checks the add-record form; payments cannot be dated in the future.
pub fn validate_new_record(
    date: &str,
    amount: &str,
    today: NaiveDate,
) -> Result<NewRecord, ValidationError> {
    if date.trim().is_empty() || amount.trim().is_empty() {
        return Err(ValidationError::new("Please enter date and amount"));
    }
    let day = dates::parse_input_date(date).map_err(|e| ValidationError::new(e.to_string()))?;
    if dates::is_future(day, today) {
        return Err(ValidationError::new("You cannot select a future date"));
    }
    Ok(NewRecord {
        today_date: dates::to_input_value(day),
        today_received_amount: parse_amount(amount)?,
    })
}

pub fn can_add_record(role: Role, completed: bool) -> bool {
    matches!(role, Role::Admin | Role::Editor) && !completed
}

/// Admins may correct any row of an open account; editors only the latest
/// entry. Once an account is completed only its latest entry stays editable.
pub fn can_edit_record(role: Role, is_latest: bool, completed: bool) -> bool {
    match role {
        Role::Admin => !completed || is_latest,
        Role::Editor => is_latest,
        Role::Unknown => false,
    }
}

pub fn can_delete_record(role: Role, completed: bool) -> bool {
    role == Role::Admin && !completed
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Editor {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditorForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl EditorForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("Name is required"));
        }
        if !is_gmail_address(&self.email) {
            return Err(ValidationError::new(
                "Invalid email format (must be @gmail.com)",
            ));
        }
        validate_password_length(&self.password)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditorUpdate {
    pub name: String,
    pub email: String,
}

/// Accounts are provisioned on Gmail only.
pub fn is_gmail_address(raw: &str) -> bool {
    let Some((local, domain)) = raw.trim().rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        && domain.eq_ignore_ascii_case("gmail.com")
}

fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::new("Password is required"));
    }
    if password.chars().count() < 6 {
        return Err(ValidationError::new(
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::new("Email is required"));
    }
    if !is_gmail_address(email) {
        return Err(ValidationError::new(
            "Invalid email format (must be @gmail.com)",
        ));
    }
    validate_password_length(password)
}

/// New passwords look like `Abc@1234`: letters (at least one upper and one
/// lower case), `@`, then digits.
pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::new("Password is required"));
    }
    let well_formed = password.split_once('@').is_some_and(|(letters, digits)| {
        !letters.is_empty()
            && letters.chars().all(|c| c.is_ascii_alphabetic())
            && letters.chars().any(|c| c.is_ascii_lowercase())
            && letters.chars().any(|c| c.is_ascii_uppercase())
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
    });
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new(
            "Password must have upper and lower case letters before '@' and only numbers after it, e.g. Abc@1234",
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    #[serde(default)]
    pub today_collection: f64,
    #[serde(default)]
    pub total_pending: f64,
    #[serde(default)]
    pub total_balance: f64,
    #[serde(default)]
    pub pending_per_customer: HashMap<String, f64>,
}

impl DashboardTotals {
    pub fn pending_for(&self, customer_id: &str) -> f64 {
        self.pending_per_customer
            .get(customer_id)
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// How the backend chose to deliver a password reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryMethod {
    Link,
    Otp,
    Unsupported(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForgotPasswordResponse {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ForgotPasswordResponse {
    pub fn method(&self) -> RecoveryMethod {
        match self.method.as_deref() {
            Some("link") => RecoveryMethod::Link,
            Some("otp") => RecoveryMethod::Otp,
            _ => RecoveryMethod::Unsupported(
                self.message.clone().unwrap_or_else(|| "Failed".to_string()),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// `1,234,567` style grouping for rupee amounts; cents are shown only when
/// present.
pub fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let digits = (total_cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let cents = total_cents % 100;
    if cents == 0 {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, account_no: &str, name: &str) -> Customer {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "accountNo": account_no,
            "name": name,
        }))
        .unwrap()
    }

    fn record(id: &str, amount: f64) -> CustomerRecord {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "todayDate": "2024-03-01T00:00:00.000Z",
            "todayReceivedAmount": amount,
        }))
        .unwrap()
    }

    #[test]
    fn customer_decodes_populated_and_plain_creator() {
        let populated: Customer = serde_json::from_str(
            r#"{"_id":"c1","accountNo":"12/24","name":"Meena","mobile":"98400",
                "totalDays":100,"dailyCollection":150,"totalAmountGiven":12000.5,
                "isCompleted":true,"createdBy":{"_id":"u1","name":"Ravi"}}"#,
        )
        .unwrap();
        assert_eq!(populated.created_by_label(), "Ravi");
        assert!(populated.is_completed);
        assert_eq!(populated.total_amount_given, Some(12000.5));

        let plain: Customer =
            serde_json::from_str(r#"{"_id":"c2","createdBy":"Asha"}"#).unwrap();
        assert_eq!(plain.created_by_label(), "Asha");
        assert!(!plain.is_completed);

        let anonymous = customer("c3", "1/24", "X");
        assert_eq!(anonymous.created_by_label(), "—");
    }

    #[test]
    fn sorts_by_numeric_account_prefix() {
        let mut list = vec![
            customer("a", "100/24", "A"),
            customer("b", "9/24", "B"),
            customer("c", "oops", "C"),
            customer("d", "20/23", "D"),
        ];
        sort_by_account(&mut list);
        let order: Vec<&str> = list.iter().map(|c| c.account_no.as_str()).collect();
        assert_eq!(order, ["9/24", "20/23", "100/24", "oops"]);

        insert_sorted(&mut list, customer("e", "50/24", "E"));
        let order: Vec<&str> = list.iter().map(|c| c.account_no.as_str()).collect();
        assert_eq!(order, ["9/24", "20/23", "50/24", "100/24", "oops"]);
    }

    #[test]
    fn update_form_prefills_and_writes_back() {
        let stored: Customer = serde_json::from_str(
            r#"{"_id":"c1","accountNo":"12/24","name":"Meena","mobile":"98400",
                "startDate":"2024-01-05T00:00:00.000Z","totalDays":100,
                "dailyCollection":150,"totalAmountGiven":12000.5,"isCompleted":false}"#,
        )
        .unwrap();
        let form = CustomerForm::from_customer(&stored);
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            serde_json::json!({
                "accountNo": "12/24",
                "name": "Meena",
                "mobile": "98400",
                "startDate": "2024-01-05",
                "endDate": "",
                "totalDays": "100",
                "dailyCollection": "150",
                "totalAmountGiven": "12000.5",
            })
        );

        let edited = CustomerForm {
            mobile: " 99999 ".into(),
            end_date: "2024-04-14".into(),
            daily_collection: "175".into(),
            ..form.clone()
        };
        let updated = edited.apply_to(&stored);
        assert_eq!(updated.id, "c1");
        assert_eq!(updated.mobile, "99999");
        assert_eq!(updated.start_date.as_deref(), Some("2024-01-05"));
        assert_eq!(updated.end_date.as_deref(), Some("2024-04-14"));
        assert_eq!(updated.daily_collection, Some(175.0));
        assert_eq!(updated.total_days, Some(100));
        assert_eq!(CustomerForm::from_customer(&form.apply_to(&stored)), form);
    }

    #[test]
    fn name_filter_ignores_case() {
        let list = vec![
            customer("a", "1/24", "Lakshmi"),
            customer("b", "2/24", "Ramesh"),
        ];
        assert_eq!(filter_by_name(&list, "LAK").len(), 1);
        assert_eq!(filter_by_name(&list, "  ").len(), 2);
        assert!(filter_by_name(&list, "zzz").is_empty());
    }

    #[test]
    fn account_number_format() {
        assert!(is_valid_account_no("100/25"));
        assert!(is_valid_account_no(" 7/24 "));
        assert!(!is_valid_account_no("100/2025"));
        assert!(!is_valid_account_no("/25"));
        assert!(!is_valid_account_no("10a/25"));
        assert!(!is_valid_account_no("100"));
    }

    #[test]
    fn customer_form_checks_account_then_name() {
        let mut form = CustomerForm::default();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Account number is required"
        );
        form.account_no = "12".into();
        assert!(form.validate().unwrap_err().to_string().contains("100/25"));
        form.account_no = "12/24".into();
        assert_eq!(form.validate().unwrap_err().to_string(), "Name is required");
        form.name = "Meena".into();
        assert!(form.validate().is_ok());

        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["accountNo"], "12/24");
        assert!(body.get("totalAmountGiven").is_some());
    }

    #[test]
    fn running_totals_in_one_pass() {
        let mut records = vec![record("r1", 100.0), record("r2", 150.0), record("r3", 0.0)];
        assert_eq!(apply_running_totals(&mut records), 250.0);
        let totals: Vec<Option<f64>> =
            records.iter().map(|r| r.total_received_amount).collect();
        assert_eq!(totals, [Some(100.0), Some(250.0), Some(250.0)]);
        assert_eq!(apply_running_totals(&mut []), 0.0);
    }

    #[test]
    fn records_response_tolerates_missing_parts() {
        let body: RecordsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.records.is_empty());
        assert!(body.customer.is_none());
    }

    #[test]
    fn new_record_validation() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(
            validate_new_record("", "100", today).unwrap_err().to_string(),
            "Please enter date and amount"
        );
        assert_eq!(
            validate_new_record("2024-03-11", "100", today)
                .unwrap_err()
                .to_string(),
            "You cannot select a future date"
        );
        assert!(validate_new_record("2024-03-10", "abc", today).is_err());
        assert!(validate_new_record("2024-03-10", "-5", today).is_err());
        assert_eq!(
            validate_new_record("2024-03-10", "150", today).unwrap(),
            NewRecord {
                today_date: "2024-03-10".into(),
                today_received_amount: 150.0
            }
        );
    }

    #[test]
    fn record_permissions() {
        assert!(can_edit_record(Role::Admin, false, false));
        assert!(!can_edit_record(Role::Admin, false, true));
        assert!(can_edit_record(Role::Admin, true, true));
        assert!(can_edit_record(Role::Editor, true, false));
        assert!(!can_edit_record(Role::Editor, false, false));
        assert!(!can_edit_record(Role::Unknown, true, false));

        assert!(can_delete_record(Role::Admin, false));
        assert!(!can_delete_record(Role::Admin, true));
        assert!(!can_delete_record(Role::Editor, false));

        assert!(can_add_record(Role::Editor, false));
        assert!(!can_add_record(Role::Editor, true));
        assert!(!can_add_record(Role::Unknown, false));
    }

    #[test]
    fn gmail_only() {
        assert!(is_gmail_address("ravi.k+test@gmail.com"));
        assert!(is_gmail_address("Ravi@GMAIL.com"));
        assert!(!is_gmail_address("ravi@yahoo.com"));
        assert!(!is_gmail_address("@gmail.com"));
        assert!(!is_gmail_address("ra vi@gmail.com"));
    }

    #[test]
    fn login_and_editor_validation() {
        assert_eq!(
            validate_login("", "secret1").unwrap_err().to_string(),
            "Email is required"
        );
        assert!(validate_login("a@gmail.com", "12345").is_err());
        assert!(validate_login("a@gmail.com", "123456").is_ok());

        let form = EditorForm {
            name: " ".into(),
            email: "a@gmail.com".into(),
            password: "secret1".into(),
        };
        assert_eq!(form.validate().unwrap_err().to_string(), "Name is required");
        let form = EditorForm {
            name: "Asha".into(),
            ..form
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn new_password_shape() {
        assert!(validate_new_password("Abc@1234").is_ok());
        assert!(validate_new_password("abc@1234").is_err());
        assert!(validate_new_password("ABC@1234").is_err());
        assert!(validate_new_password("Abc1234").is_err());
        assert!(validate_new_password("Abc@").is_err());
        assert!(validate_new_password("Ab1@1234").is_err());
    }

    #[test]
    fn totals_default_missing_fields() {
        let totals: DashboardTotals = serde_json::from_str(
            r#"{"todayCollection":500,"pendingPerCustomer":{"c1":120}}"#,
        )
        .unwrap();
        assert_eq!(totals.today_collection, 500.0);
        assert_eq!(totals.total_balance, 0.0);
        assert_eq!(totals.pending_for("c1"), 120.0);
        assert_eq!(totals.pending_for("c2"), 0.0);
    }

    #[test]
    fn recovery_method() {
        let link: ForgotPasswordResponse = serde_json::from_str(r#"{"method":"link"}"#).unwrap();
        assert_eq!(link.method(), RecoveryMethod::Link);
        let otp: ForgotPasswordResponse = serde_json::from_str(r#"{"method":"otp"}"#).unwrap();
        assert_eq!(otp.method(), RecoveryMethod::Otp);
        let other: ForgotPasswordResponse =
            serde_json::from_str(r#"{"message":"No such user"}"#).unwrap();
        assert_eq!(
            other.method(),
            RecoveryMethod::Unsupported("No such user".into())
        );
    }

    #[test]
    fn amount_formatting() {
        assert_eq!(format_amount(0.0), "₹0");
        assert_eq!(format_amount(1500.0), "₹1,500");
        assert_eq!(format_amount(1234567.0), "₹1,234,567");
        assert_eq!(format_amount(99.5), "₹99.50");
        assert_eq!(format_amount(-2500.0), "-₹2,500");
    }
}
