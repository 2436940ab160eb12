// src/common/format.rs

//! Formatação compartilhada entre a visão interativa (JSON) e os PDFs.
//! Funções puras: os dois caminhos de renderização chamam exatamente
//! as mesmas funções, então os números nunca divergem entre as saídas.

/// Formata um valor em pesos chilenos inteiros: `$ 1.234.567`.
/// Separador de milhares com ponto, sem casas decimais.
pub fn fmt_clp(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("$ -{grouped}")
    } else {
        format!("$ {grouped}")
    }
}

/// Formata um percentual com uma casa decimal: `66.7%`.
pub fn fmt_pct(n: f64) -> String {
    format!("{n:.1}%")
}

/// Nome do mês em espanhol (1 a 12). Meses fora do intervalo já foram
/// rejeitados na validação do período.
pub fn month_name_es(month: u32) -> &'static str {
    match month {
        1 => "Enero",
        2 => "Febrero",
        3 => "Marzo",
        4 => "Abril",
        5 => "Mayo",
        6 => "Junio",
        7 => "Julio",
        8 => "Agosto",
        9 => "Septiembre",
        10 => "Octubre",
        11 => "Noviembre",
        12 => "Diciembre",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clp_agrupa_milhares_com_ponto() {
        assert_eq!(fmt_clp(0), "$ 0");
        assert_eq!(fmt_clp(999), "$ 999");
        assert_eq!(fmt_clp(1000), "$ 1.000");
        assert_eq!(fmt_clp(1234567), "$ 1.234.567");
        assert_eq!(fmt_clp(1_000_000_000), "$ 1.000.000.000");
    }

    #[test]
    fn clp_negativo() {
        assert_eq!(fmt_clp(-4500), "$ -4.500");
    }

    #[test]
    fn pct_uma_casa_decimal() {
        assert_eq!(fmt_pct(0.0), "0.0%");
        assert_eq!(fmt_pct(100.0 * 4000.0 / 6000.0), "66.7%");
        assert_eq!(fmt_pct(100.0 * 2000.0 / 6000.0), "33.3%");
    }

    #[test]
    fn nome_do_mes() {
        assert_eq!(month_name_es(1), "Enero");
        assert_eq!(month_name_es(12), "Diciembre");
        assert_eq!(month_name_es(13), "?");
    }
}
