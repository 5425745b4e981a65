//! Noyau — évaluation (pipeline complet)
//!
//! tokenize -> réduction {* / %} -> réduction {+ -} -> validation
//!
//! Le tout est pur : aucun état partagé. L'appelant (la machine de
//! saisie) décide quoi faire du résultat ou de la panne.

use super::jetons::{tokenize, Tok};

/* ------------------------ Sentinelles ------------------------ */

/// Division 0/0 écrite telle quelle dans l'expression.
pub const DIVISION_ZERO: &str = "Can't divide by zero";
/// Résultat NaN ou infini.
pub const ERREUR_FORMAT: &str = "Format Error";
/// Panne interne du pipeline (expression abandonnée).
pub const PANNE_NAN: &str = "NaN";

/// Précision d'affichage des résultats non entiers.
const DECIMALES: usize = 3;

/// Vrai si `s` est une des sentinelles : un « résultat » qui ne peut pas
/// servir d'opérande, la prochaine saisie repart de zéro.
pub fn est_resultat_invalide(s: &str) -> bool {
    s == PANNE_NAN || s == DIVISION_ZERO || s == ERREUR_FORMAT
}

/* ------------------------ Pannes ------------------------ */

/// Panne interne du pipeline (séquence de jetons mal formée).
/// Ne franchit jamais la frontière UI : la machine de saisie la rabat
/// sur la sentinelle "NaN" et vide l'expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Panne {
    /// Caractère hors de l'alphabet `0-9 . + - * / %`.
    CaractereInattendu(char),
    /// Opérateur binaire sans opérande gauche ou droite.
    OperandeManquante,
    /// La réduction ne laisse aucun nombre en tête.
    ResultatInvalide,
}

/* ------------------------ Pipeline ------------------------ */

/// API publique : évalue une expression complète et retourne la chaîne
/// à afficher (nombre formaté, ou sentinelle de §Sentinelles).
pub fn eval_expression(expr: &str) -> Result<String, Panne> {
    let jetons = tokenize(expr)?;

    // Passe 1 : opérateurs prioritaires, passe 2 : additifs.
    let restants = applique_precedence(jetons, est_prioritaire)?;
    let fin = applique_precedence(restants, est_additif)?;

    // Le résultat est le premier nombre restant.
    let valeur = match fin.first() {
        Some(Tok::Num(v)) => *v,
        _ => return Err(Panne::ResultatInvalide),
    };

    Ok(valide_resultat(expr, valeur))
}

fn est_prioritaire(t: &Tok) -> bool {
    matches!(t, Tok::Star | Tok::Slash | Tok::Percent)
}

fn est_additif(t: &Tok) -> bool {
    matches!(t, Tok::Plus | Tok::Minus)
}

/// Une passe de réduction gauche-droite : les nombres sont recopiés ;
/// un opérateur sélectionné par `cible` dépile le dernier nombre émis,
/// consomme le jeton suivant comme opérande droite et ré-émet le
/// résultat replié. Les opérateurs non sélectionnés passent tels quels
/// (pour la passe suivante).
fn applique_precedence<F>(jetons: Vec<Tok>, cible: F) -> Result<Vec<Tok>, Panne>
where
    F: Fn(&Tok) -> bool,
{
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len());
    let mut entree = jetons.into_iter();

    while let Some(jeton) = entree.next() {
        match jeton {
            Tok::Num(_) => out.push(jeton),
            _ if cible(&jeton) => {
                let gauche = match out.pop() {
                    Some(Tok::Num(v)) => v,
                    _ => return Err(Panne::OperandeManquante),
                };
                let droite = match entree.next() {
                    Some(Tok::Num(v)) => v,
                    _ => return Err(Panne::OperandeManquante),
                };
                out.push(Tok::Num(opere(gauche, droite, jeton)));
            }
            _ => out.push(jeton),
        }
    }

    Ok(out)
}

/// Sémantique binaire IEEE. Le reste `%` garde le signe du dividende
/// (reste de la division tronquée, pas un modulo mathématique).
fn opere(a: f64, b: f64, op: Tok) -> f64 {
    match op {
        Tok::Plus => a + b,
        Tok::Minus => a - b,
        Tok::Star => a * b,
        Tok::Slash => a / b,
        Tok::Percent => a % b,
        Tok::Num(_) => unreachable!("opérateur attendu"),
    }
}

/* ------------------------ Validation ------------------------ */

/// Validation du résultat calculé, dans l'ordre :
/// 1. l'expression BRUTE contient "0/0" -> sentinelle division par zéro
///    (test textuel assumé : "100/0" la déclenche aussi)
/// 2. NaN ou infini -> "Format Error"
/// 3. partie fractionnaire -> arrondi à 3 décimales, re-parsé pour
///    tomber les zéros finaux (1.500 -> "1.5")
/// 4. entier -> tel quel ("5", pas "5.0")
fn valide_resultat(expr: &str, valeur: f64) -> String {
    if expr.contains("0/0") {
        return DIVISION_ZERO.to_string();
    }
    if valeur.is_nan() || valeur.is_infinite() {
        return ERREUR_FORMAT.to_string();
    }
    if valeur == 0.0 {
        // couvre aussi -0.0
        return "0".to_string();
    }
    if valeur.fract() != 0.0 {
        let arrondi = format!("{valeur:.prec$}", prec = DECIMALES);
        return arrondi.parse::<f64>().map_or(arrondi, |v| v.to_string());
    }
    valeur.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(expr: &str) -> String {
        eval_expression(expr).unwrap_or_else(|p| panic!("eval({expr:?}) panne: {p:?}"))
    }

    /* --- arithmétique de base --- */

    #[test]
    fn addition_simple() {
        assert_eq!(ok("2+3"), "5");
    }

    #[test]
    fn priorite_multiplication() {
        assert_eq!(ok("2+3*4"), "14");
    }

    #[test]
    fn priorites_en_chaine() {
        // 2*3 replié d'abord, puis 8/4, puis la passe additive
        assert_eq!(ok("2*3+8/4-1"), "7");
    }

    #[test]
    fn division_decimale() {
        assert_eq!(ok("6/4"), "1.5");
    }

    #[test]
    fn moins_unaire_en_tete() {
        assert_eq!(ok("-5+3"), "-2");
    }

    #[test]
    fn moins_unaire_en_seconde_operande() {
        assert_eq!(ok("5+-3"), "2");
    }

    #[test]
    fn reste_signe_du_dividende() {
        assert_eq!(ok("7%3"), "1");
        assert_eq!(ok("-7%3"), "-1");
    }

    /* --- sentinelles --- */

    #[test]
    fn zero_sur_zero_litteral() {
        assert_eq!(ok("0/0"), DIVISION_ZERO);
    }

    #[test]
    fn zero_sur_zero_par_sous_chaine() {
        // le test est textuel : "100/0" contient "0/0"
        assert_eq!(ok("100/0"), DIVISION_ZERO);
    }

    #[test]
    fn division_par_zero_non_litterale() {
        assert_eq!(ok("5/0"), ERREUR_FORMAT);
    }

    #[test]
    fn reste_par_zero() {
        assert_eq!(ok("5%0"), ERREUR_FORMAT);
    }

    #[test]
    fn point_orphelin_vaut_format_error() {
        // "5+." se tokenise en 5 + NaN
        assert_eq!(ok("5+."), ERREUR_FORMAT);
    }

    /* --- formatage --- */

    #[test]
    fn arrondi_trois_decimales() {
        assert_eq!(ok("10/3"), "3.333");
        assert_eq!(ok("1/8"), "0.125");
    }

    #[test]
    fn zeros_finaux_tombes() {
        assert_eq!(ok("3/2"), "1.5");
    }

    #[test]
    fn flottants_arrondis_a_l_affichage() {
        assert_eq!(ok("0.1+0.2"), "0.3");
    }

    #[test]
    fn zero_negatif_affiche_zero() {
        assert_eq!(ok("0*-5"), "0");
    }

    /* --- pannes --- */

    #[test]
    fn operande_gauche_manquante() {
        assert_eq!(eval_expression("+5"), Err(Panne::OperandeManquante));
    }

    #[test]
    fn expression_vide() {
        assert_eq!(eval_expression(""), Err(Panne::ResultatInvalide));
    }

    #[test]
    fn caractere_inconnu_remonte() {
        assert_eq!(eval_expression("2^3"), Err(Panne::CaractereInattendu('^')));
    }

    #[test]
    fn sentinelles_reconnues() {
        assert!(est_resultat_invalide(PANNE_NAN));
        assert!(est_resultat_invalide(DIVISION_ZERO));
        assert!(est_resultat_invalide(ERREUR_FORMAT));
        assert!(!est_resultat_invalide("5"));
    }
}
