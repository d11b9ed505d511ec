//! Validation utilities for the Stride retail back-office

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate store location code format (2-10 uppercase alphanumeric)
pub fn validate_loc_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 {
        return Err("Location code must be at least 2 characters");
    }
    if code.len() > 10 {
        return Err("Location code must be at most 10 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err("Location code must be uppercase alphanumeric only");
    }
    Ok(())
}

/// Validate SKU format (non-empty, at most 40 characters, no whitespace)
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.is_empty() {
        return Err("SKU must not be empty");
    }
    if sku.len() > 40 {
        return Err("SKU must be at most 40 characters");
    }
    if sku.chars().any(|c| c.is_whitespace()) {
        return Err("SKU must not contain whitespace");
    }
    Ok(())
}

/// Validate a warehouse name (non-empty after trimming)
pub fn validate_warehouse_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Warehouse name must not be empty");
    }
    Ok(())
}
