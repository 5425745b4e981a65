//! src/noyau/saisie.rs
//!
//! Machine de saisie : le tampon d'expression + ses drapeaux.
//!
//! Rôle : décider, symbole par symbole, ce qui a le droit d'entrer dans
//! l'expression en cours, et piloter le passage en mode « résultat
//! affiché » après une évaluation.
//!
//! Contrats :
//! - Aucun accès UI ici : la vue lit `affichage()` et `egal_actif()`.
//! - Chaque opération mute l'état d'un bloc, sans étape intermédiaire
//!   observable (mono-thread, la vue sérialise clavier + souris).
//! - `dernier_resultat` survit à `effacer()`.

use super::eval::{est_resultat_invalide, eval_expression, PANNE_NAN};

/// État complet de la calculatrice (tampon + drapeaux).
#[derive(Clone, Debug, Default)]
pub struct Saisie {
    /// Le tampon d'expression : ce qui est affiché ET ce qui sera évalué.
    affichage: String,

    // --- drapeaux ---
    /// Un point décimal existe dans le nombre en cours de frappe
    /// (retombe quand un nouveau segment commence, après un opérateur).
    point_utilise: bool,
    /// Le dernier caractère entré est un opérateur (substitution possible).
    dernier_op: bool,
    /// Au moins un chiffre ou un point depuis le dernier effacement ou
    /// résultat ; conditionne `egal_actif`.
    nombre_saisi: bool,
    /// Un moins unaire de tête a été posé avant tout chiffre.
    moins_initial: bool,
    /// Le tampon montre un résultat fini, pas une expression en cours.
    resultat_affiche: bool,

    /// Dernier résultat calculé (enchaînement résultat + opérateur).
    dernier_resultat: Option<String>,
}

impl Saisie {
    pub fn new() -> Self {
        Self::default()
    }

    /* ------------------------ Lectures ------------------------ */

    /// La chaîne à afficher.
    pub fn affichage(&self) -> &str {
        &self.affichage
    }

    /// Signal « évaluation permise » : expression non vide et au moins un
    /// chiffre saisi. La vue doit griser « = » quand c'est faux, et le
    /// revérifier après chaque mutation.
    pub fn egal_actif(&self) -> bool {
        !self.affichage.is_empty() && self.nombre_saisi
    }

    /* ------------------------ Saisie d'un symbole ------------------------ */

    /// Soumet un symbole (`0-9`, `.`, `+`, `-`, `*`, `/`, `%`).
    /// Tout autre caractère est ignoré (la vue filtre déjà en amont).
    pub fn saisir(&mut self, v: char) {
        if !est_symbole(v) {
            return;
        }

        if self.resultat_affiche {
            self.saisir_apres_resultat(v);
        } else if !self.nombre_saisi {
            self.saisir_debut(v);
        } else {
            self.saisir_apres_nombre(v);
        }
    }

    /// Mode « résultat affiché » : un chiffre repart à neuf, un opérateur
    /// enchaîne sur le dernier résultat, une sentinelle repart de zéro.
    fn saisir_apres_resultat(&mut self, v: char) {
        if est_resultat_invalide(&self.affichage) {
            // une sentinelle n'est pas réutilisable
            self.effacer();
            self.saisir(v);
        } else if v.is_ascii_digit() || v == '.' {
            self.effacer();
            self.affichage.push(v);
            self.reinitialise_drapeaux(Some(v));
        } else if est_operateur(v) {
            self.reinitialise_drapeaux(None);
            self.affichage = self.dernier_resultat.clone().unwrap_or_default();
            self.affichage.push(v);
            self.dernier_op = true;
        }
    }

    /// Avant tout chiffre : seul un moins de tête (une fois) ou un début
    /// de nombre sont admis.
    fn saisir_debut(&mut self, v: char) {
        if v == '-' && !self.moins_initial {
            self.affichage.push(v);
            self.moins_initial = true;
        } else if est_operateur(v) && self.moins_initial {
            // un opérateur nu ne peut pas suivre un moins seul
            self.effacer();
        } else if v.is_ascii_digit() || (v == '.' && !self.point_utilise) {
            self.affichage.push(v);
            self.nombre_saisi = true;
            self.point_utilise = v == '.';
        }
    }

    /// Après au moins un chiffre : chiffres libres, un point par segment,
    /// opérateur ajouté ou substitué au précédent.
    fn saisir_apres_nombre(&mut self, v: char) {
        if v.is_ascii_digit() {
            self.affichage.push(v);
            self.dernier_op = false;
        } else if v == '.' && !self.point_utilise {
            self.affichage.push(v);
            self.point_utilise = true;
            self.dernier_op = false;
        } else if est_operateur(v) {
            if self.dernier_op {
                // un seul opérateur entre deux opérandes : substitution
                self.affichage.pop();
            }
            self.affichage.push(v);
            self.dernier_op = true;
            self.point_utilise = false;
        }
    }

    /// Le « reset nouveau nombre » : seuls les drapeaux du nombre en cours
    /// et le mode résultat sont touchés. `moins_initial` et `dernier_op`
    /// gardent leur valeur, leur sens déborde ce reset.
    fn reinitialise_drapeaux(&mut self, v: Option<char>) {
        self.resultat_affiche = false;
        self.point_utilise = v == Some('.');
        self.nombre_saisi = v.map_or(false, |c| c.is_ascii_digit());
    }

    /* ------------------------ Retour arrière ------------------------ */

    /// Supprime le dernier caractère et rend les droits associés (point,
    /// opérateur, moins de tête). Tampon vidé = effacement complet.
    pub fn retour_arriere(&mut self) {
        if let Some(c) = self.affichage.pop() {
            if c == '.' {
                self.point_utilise = false;
            }
            if est_operateur(c) {
                self.dernier_op = false;
            }
            if c == '-' {
                self.moins_initial = false;
            }

            if self.affichage.is_empty() {
                self.effacer();
            }
        }
    }

    /* ------------------------ Effacement ------------------------ */

    /// Remise à zéro du tampon et de tous les drapeaux.
    /// `dernier_resultat` est volontairement conservé.
    pub fn effacer(&mut self) {
        self.affichage.clear();
        self.point_utilise = false;
        self.dernier_op = false;
        self.nombre_saisi = false;
        self.moins_initial = false;
        self.resultat_affiche = false;
    }

    /* ------------------------ Évaluation ------------------------ */

    /// Évalue le tampon courant. Sans effet si l'expression n'est pas
    /// complète : vide, point seul, ou terminée par un opérateur.
    pub fn evaluer(&mut self) {
        if self.affichage.is_empty()
            || self.affichage == "."
            || self.affichage.chars().last().is_some_and(est_operateur)
        {
            return;
        }

        match eval_expression(&self.affichage) {
            Ok(res) => {
                self.affichage = res.clone();
                self.dernier_resultat = Some(res);
                self.reinitialise_drapeaux(None);
                self.nombre_saisi = true;
                self.resultat_affiche = true;
            }
            Err(_) => {
                // panne interne : on ferme tout, sentinelle NaN à l'écran
                self.effacer();
                self.affichage.push_str(PANNE_NAN);
                self.resultat_affiche = true;
            }
        }
    }
}

/// Alphabet accepté par la machine.
fn est_symbole(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || est_operateur(c)
}

/// Les cinq opérateurs binaires.
fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tape(m: &mut Saisie, symboles: &str) {
        for c in symboles.chars() {
            m.saisir(c);
        }
    }

    /* --- accumulation et signal égal --- */

    #[test]
    fn suite_de_chiffres_et_signal_egal() {
        let mut m = Saisie::new();
        assert!(!m.egal_actif());
        m.saisir('4');
        assert!(m.egal_actif());
        tape(&mut m, "27");
        assert_eq!(m.affichage(), "427");
        assert!(m.egal_actif());
    }

    #[test]
    fn symbole_hors_alphabet_ignore() {
        let mut m = Saisie::new();
        tape(&mut m, "4a(=2");
        assert_eq!(m.affichage(), "42");
    }

    /* --- opérateurs --- */

    #[test]
    fn substitution_d_operateur() {
        let mut m = Saisie::new();
        tape(&mut m, "12+");
        let longueur = m.affichage().len();
        m.saisir('*');
        assert_eq!(m.affichage(), "12*");
        assert_eq!(m.affichage().len(), longueur);
    }

    #[test]
    fn operateur_ignore_sur_vide() {
        let mut m = Saisie::new();
        m.saisir('+');
        assert_eq!(m.affichage(), "");
        m.saisir('5');
        assert_eq!(m.affichage(), "5");
    }

    #[test]
    fn moins_de_tete_unique() {
        let mut m = Saisie::new();
        m.saisir('-');
        assert_eq!(m.affichage(), "-");
        assert!(!m.egal_actif());
        // second opérateur sur un moins seul : tout s'efface
        m.saisir('*');
        assert_eq!(m.affichage(), "");
    }

    #[test]
    fn moins_puis_moins_efface() {
        let mut m = Saisie::new();
        tape(&mut m, "--");
        assert_eq!(m.affichage(), "");
    }

    /* --- point décimal --- */

    #[test]
    fn un_seul_point_par_segment() {
        let mut m = Saisie::new();
        tape(&mut m, "1.5.");
        assert_eq!(m.affichage(), "1.5");
    }

    #[test]
    fn point_reouvert_apres_operateur() {
        let mut m = Saisie::new();
        tape(&mut m, "1.5+2.25");
        assert_eq!(m.affichage(), "1.5+2.25");
    }

    /* --- évaluation --- */

    #[test]
    fn evaluation_simple() {
        let mut m = Saisie::new();
        tape(&mut m, "2+3");
        m.evaluer();
        assert_eq!(m.affichage(), "5");
        assert_eq!(m.dernier_resultat.as_deref(), Some("5"));
        assert!(m.resultat_affiche);
        assert!(m.egal_actif());
    }

    #[test]
    fn evaluation_refusee_si_incomplete() {
        let mut m = Saisie::new();
        tape(&mut m, "2+");
        m.evaluer();
        assert_eq!(m.affichage(), "2+");
        assert!(!m.resultat_affiche);

        let mut p = Saisie::new();
        p.saisir('.');
        p.evaluer();
        assert_eq!(p.affichage(), ".");
    }

    #[test]
    fn enchainement_apres_resultat() {
        let mut m = Saisie::new();
        tape(&mut m, "2+3");
        m.evaluer();
        tape(&mut m, "+5");
        assert_eq!(m.affichage(), "5+5");
        m.evaluer();
        assert_eq!(m.affichage(), "10");
    }

    #[test]
    fn chiffre_apres_resultat_repart_a_neuf() {
        let mut m = Saisie::new();
        tape(&mut m, "2+3");
        m.evaluer();
        m.saisir('7');
        assert_eq!(m.affichage(), "7");
        assert!(m.egal_actif());
    }

    /* --- sentinelles --- */

    #[test]
    fn sentinelle_puis_chiffre_repart_de_zero() {
        let mut m = Saisie::new();
        tape(&mut m, "5/0");
        m.evaluer();
        assert_eq!(m.affichage(), "Format Error");
        m.saisir('9');
        assert_eq!(m.affichage(), "9");
        assert!(m.egal_actif());
    }

    #[test]
    fn sentinelle_puis_operateur_ne_chaine_pas() {
        let mut m = Saisie::new();
        tape(&mut m, "0/0");
        m.evaluer();
        assert_eq!(m.affichage(), "Can't divide by zero");
        m.saisir('+');
        assert_eq!(m.affichage(), "");
        assert!(!m.egal_actif());
    }

    /* --- retour arrière --- */

    #[test]
    fn retour_arriere_rend_le_point() {
        let mut m = Saisie::new();
        tape(&mut m, "3.");
        m.retour_arriere();
        m.saisir('.');
        assert_eq!(m.affichage(), "3.");
    }

    #[test]
    fn retour_arriere_rend_l_operateur() {
        let mut m = Saisie::new();
        tape(&mut m, "3+");
        m.retour_arriere();
        tape(&mut m, "7");
        assert_eq!(m.affichage(), "37");
    }

    #[test]
    fn retour_arriere_jusqu_au_vide_reinitialise() {
        let mut m = Saisie::new();
        m.saisir('-');
        m.retour_arriere();
        assert_eq!(m.affichage(), "");
        // le moins de tête redevient permis
        m.saisir('-');
        assert_eq!(m.affichage(), "-");
    }

    #[test]
    fn retour_arriere_sur_vide_sans_effet() {
        let mut m = Saisie::new();
        m.retour_arriere();
        assert_eq!(m.affichage(), "");
        assert!(!m.egal_actif());
    }

    /* --- effacement --- */

    #[test]
    fn effacer_est_idempotent() {
        let mut m = Saisie::new();
        tape(&mut m, "8*8");
        m.effacer();
        assert_eq!(m.affichage(), "");
        assert!(!m.egal_actif());
        m.effacer();
        assert_eq!(m.affichage(), "");
        assert!(!m.egal_actif());
    }

    #[test]
    fn effacer_conserve_le_dernier_resultat() {
        let mut m = Saisie::new();
        tape(&mut m, "6*7");
        m.evaluer();
        m.effacer();
        assert_eq!(m.affichage(), "");
        assert_eq!(m.dernier_resultat.as_deref(), Some("42"));
    }
}
