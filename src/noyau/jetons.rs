// src/noyau/jetons.rs

use super::eval::Panne;

/// Jetons produits par la tokenisation d'une expression.
///
/// Le moins unaire n'existe pas ici : il est replié dans le numéral
/// (voir `tokenize`), donc `Minus` est toujours une soustraction binaire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5)
/// - opérateurs + - * / %
/// - moins unaire : un '-' en début de chaîne, ou dont le caractère
///   précédent n'est pas un chiffre, démarre un numéral négatif au lieu
///   de sortir un jeton opérateur
pub fn tokenize(s: &str) -> Result<Vec<Tok>, Panne> {
    let mut out = Vec::new();
    let mut numeral = String::new();
    let mut precedent: Option<char> = None;

    for c in s.chars() {
        if c.is_ascii_digit() || c == '.' {
            numeral.push(c);
        } else {
            if !numeral.is_empty() {
                out.push(Tok::Num(parse_numeral(&numeral)));
                numeral.clear();
            }

            if c == '-' && precedent.map_or(true, |p| !p.is_ascii_digit()) {
                // moins unaire : démarre le numéral suivant
                numeral.push('-');
            } else {
                out.push(jeton_operateur(c)?);
            }
        }
        precedent = Some(c);
    }

    if !numeral.is_empty() {
        out.push(Tok::Num(parse_numeral(&numeral)));
    }

    Ok(out)
}

fn jeton_operateur(c: char) -> Result<Tok, Panne> {
    match c {
        '+' => Ok(Tok::Plus),
        '-' => Ok(Tok::Minus),
        '*' => Ok(Tok::Star),
        '/' => Ok(Tok::Slash),
        '%' => Ok(Tok::Percent),
        autre => Err(Panne::CaractereInattendu(autre)),
    }
}

/// Numéral -> f64. Un numéral illisible ("." seul, "-" seul) vaut NaN :
/// il ressortira en « Format Error » à la validation, pas en panne.
fn parse_numeral(s: &str) -> f64 {
    s.parse::<f64>().unwrap_or(f64::NAN)
}
