//! Campagne machine + évaluateur : sessions complètes, bout en bout.
//!
//! But : dérouler des suites de frappes comme le ferait la vue (symboles,
//! évaluation, retour arrière, effacement) et vérifier l'écran après
//! chaque session.
//!
//! Notation des sessions :
//! - un caractère de l'alphabet calculatrice = saisie du symbole
//! - '='  = évaluer
//! - '<'  = retour arrière
//! - 'C'  = effacer

use super::saisie::Saisie;

fn session(entrees: &str) -> Saisie {
    let mut m = Saisie::new();
    for c in entrees.chars() {
        match c {
            '=' => m.evaluer(),
            '<' => m.retour_arriere(),
            'C' => m.effacer(),
            autre => m.saisir(autre),
        }
    }
    m
}

fn ecran(entrees: &str) -> String {
    session(entrees).affichage().to_string()
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn sessions_arithmetiques() {
    assert_eq!(ecran("2+3="), "5");
    assert_eq!(ecran("2+3*4="), "14");
    assert_eq!(ecran("6/4="), "1.5");
    assert_eq!(ecran("-5+3="), "-2");
    assert_eq!(ecran("10%3="), "1");
    assert_eq!(ecran("7.5+2.25="), "9.75");
}

#[test]
fn session_arrondie() {
    assert_eq!(ecran("10/3="), "3.333");
    assert_eq!(ecran("0.1+0.2="), "0.3");
}

/* ------------------------ Sentinelles ------------------------ */

#[test]
fn sessions_sentinelles() {
    assert_eq!(ecran("0/0="), "Can't divide by zero");
    assert_eq!(ecran("5/0="), "Format Error");
    assert_eq!(ecran("5%0="), "Format Error");
}

#[test]
fn reprise_apres_sentinelle() {
    // un chiffre après une sentinelle repart sur une expression neuve
    assert_eq!(ecran("5/0=9+1="), "10");
    // un opérateur après une sentinelle ne chaîne rien
    assert_eq!(ecran("0/0=+"), "");
}

/* ------------------------ Substitution d'opérateur ------------------------ */

#[test]
fn substitution_en_rafale() {
    // chaque opérateur remplace le précédent, jamais d'empilement
    assert_eq!(ecran("8+*9="), "72");
    assert_eq!(ecran("9+++3="), "12");
    assert_eq!(ecran("6*/2="), "3");
}

/* ------------------------ Enchaînement ------------------------ */

#[test]
fn enchainement_de_resultats() {
    assert_eq!(ecran("2+3=+5="), "10");
    assert_eq!(ecran("2+3=*4="), "20");
}

#[test]
fn enchainement_avec_seconde_operande_negative() {
    // après un résultat, opérateur puis moins de tête du segment suivant
    assert_eq!(ecran("2+3=+-2="), "3");
}

#[test]
fn chiffre_apres_resultat_ecrase() {
    assert_eq!(ecran("2+3=7+1="), "8");
    assert_eq!(ecran("2+3=.5="), "0.5");
}

/* ------------------------ Retour arrière et effacement ------------------------ */

#[test]
fn retour_arriere_en_session() {
    assert_eq!(ecran("12<"), "1");
    assert_eq!(ecran("1<"), "");
    assert_eq!(ecran("12+<*3="), "36");
}

#[test]
fn effacement_puis_reprise() {
    assert_eq!(ecran("123C45="), "45");
    assert_eq!(ecran("CC"), "");
}

#[test]
fn evaluation_refusee_laisse_tout_en_place() {
    let m = session("4+=");
    assert_eq!(m.affichage(), "4+");
    assert!(m.egal_actif());
}

/* ------------------------ Signal égal ------------------------ */

#[test]
fn signal_egal_au_fil_de_la_session() {
    let mut m = Saisie::new();
    assert!(!m.egal_actif());

    m.saisir('-');
    assert!(!m.egal_actif()); // moins seul : rien à évaluer

    m.saisir('8');
    assert!(m.egal_actif());

    m.effacer();
    assert!(!m.egal_actif());
}
