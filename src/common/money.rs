// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Formata no padrão da UI: `Rp. 15.000.000` (ponto de milhar, vírgula decimal).
pub fn format_rupiah(amount: Decimal) -> String {
    format!("Rp. {}", format_id_number(amount))
}

/// Agrupamento numérico id-ID, até 3 casas decimais.
pub fn format_id_number(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    let len = int_part.len();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}
