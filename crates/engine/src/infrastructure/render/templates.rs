//! Named templates bound to their view-model shapes.
//!
//! Templates are preloaded once at startup (best-effort); a template
//! missing from the cache at render time is compiled on demand. A render
//! failure propagates to the caller as an error - nothing is retried.

use std::fmt::Write as _;
use std::sync::Arc;

use dashmap::DashMap;
use sheetpress_shared::SheetKind;

use crate::use_cases::view_model::{EntryVm, NpcVm, SectionVm, SpellcastingVm, ViewModel};

/// Identifier of a named template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Character,
    Npc,
    EncounterGroup,
    PartySummary,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Character,
        TemplateId::Npc,
        TemplateId::EncounterGroup,
        TemplateId::PartySummary,
    ];

    pub fn for_kind(kind: SheetKind) -> Self {
        match kind {
            SheetKind::Character => TemplateId::Character,
            SheetKind::Npc => TemplateId::Npc,
            SheetKind::EncounterGroup => TemplateId::EncounterGroup,
            SheetKind::PartySummary => TemplateId::PartySummary,
        }
    }
}

/// Errors raised while rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The view model handed in does not match the template's shape.
    #[error("View model shape mismatch: {template} template cannot render this model")]
    ShapeMismatch { template: &'static str },
}

/// A compiled template bound to one view-model shape.
pub trait Template: Send + Sync {
    fn render(&self, vm: &ViewModel) -> Result<String, RenderError>;
}

/// Registry of compiled templates, preloaded once and falling back to
/// on-demand compilation.
pub struct TemplateRegistry {
    compiled: DashMap<TemplateId, Arc<dyn Template>>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            compiled: DashMap::new(),
        }
    }

    /// Compile every known template up front. Best-effort: the registry
    /// still works without it, compiling on first use.
    pub fn preload(&self) {
        for id in TemplateId::ALL {
            self.compiled.entry(id).or_insert_with(|| compile(id));
        }
        tracing::debug!(count = self.compiled.len(), "templates preloaded");
    }

    /// Render a view model through the named template.
    pub fn render(&self, id: TemplateId, vm: &ViewModel) -> Result<String, RenderError> {
        let template = self
            .compiled
            .entry(id)
            .or_insert_with(|| {
                tracing::debug!(?id, "template compiled on demand");
                compile(id)
            })
            .clone();
        template.render(vm)
    }
}

fn compile(id: TemplateId) -> Arc<dyn Template> {
    match id {
        TemplateId::Character => Arc::new(CharacterTemplate),
        TemplateId::Npc => Arc::new(NpcTemplate),
        TemplateId::EncounterGroup => Arc::new(EncounterTemplate),
        TemplateId::PartySummary => Arc::new(PartyTemplate),
    }
}

// =============================================================================
// Shared fragments
// =============================================================================

fn abilities_row(out: &mut String, abilities: &[crate::use_cases::view_model::AbilityVm]) {
    out.push_str("<div class=\"abilities\">");
    for ability in abilities {
        let save_class = if ability.save_proficient {
            "save prof"
        } else {
            "save"
        };
        let _ = write!(
            out,
            "<div class=\"ability\"><div class=\"abbr\">{}</div>\
             <div class=\"mod\">{}</div><div class=\"score\">{}</div>\
             <div class=\"{}\">Save {}</div></div>",
            ability.abbr, ability.modifier, ability.score, save_class, ability.save
        );
    }
    out.push_str("</div>");
}

fn combat_row(out: &mut String, combat: &crate::use_cases::view_model::CombatVm) {
    let _ = write!(
        out,
        "<div class=\"combat-line\">\
         <span class=\"stat\"><b>AC</b> {}</span>\
         <span class=\"stat\"><b>HP</b> {}</span>\
         <span class=\"stat\"><b>Initiative</b> {}</span>\
         <span class=\"stat\"><b>Speed</b> {}</span>\
         <span class=\"stat\"><b>Proficiency</b> {}</span>",
        combat.armor_class, combat.hit_points, combat.initiative, combat.speed, combat.proficiency
    );
    if !combat.senses.is_empty() {
        let _ = write!(out, "<span class=\"stat\"><b>Senses</b> {}</span>", combat.senses);
    }
    if let Some(hit_dice) = &combat.hit_dice {
        let _ = write!(out, "<span class=\"stat\"><b>Hit Dice</b> {}</span>", hit_dice);
    }
    out.push_str("</div>");
}

fn entry_block(out: &mut String, entry: &EntryVm) {
    out.push_str("<div class=\"entry\"><span class=\"entry-name\">");
    out.push_str(&entry.name);
    out.push_str(".</span>");
    if let Some(meta) = &entry.meta {
        let _ = write!(out, " <span class=\"entry-meta\">({})</span>", meta);
    }
    out.push(' ');
    out.push_str(&entry.description);
    out.push_str("</div>");
}

fn entry_section(out: &mut String, heading: &str, entries: &[EntryVm]) {
    let _ = write!(out, "<section><h2>{}</h2>", heading);
    for entry in entries {
        entry_block(out, entry);
    }
    out.push_str("</section>");
}

fn action_sections(out: &mut String, sections: &[SectionVm]) {
    for section in sections {
        entry_section(out, &section.heading, &section.entries);
    }
}

fn spellcasting_section(out: &mut String, spellcasting: &SpellcastingVm) {
    let _ = write!(
        out,
        "<section><h2>Spellcasting</h2><p>{}</p>",
        spellcasting.summary
    );
    if let Some(pact) = &spellcasting.pact {
        let _ = write!(out, "<p class=\"slot-line\">{}</p>", pact);
    }
    for group in &spellcasting.groups {
        let _ = write!(out, "<h3>{}", group.heading);
        if let Some(slots) = &group.slots {
            let _ = write!(out, " <span class=\"slot-line\">{}</span>", slots);
        }
        out.push_str("</h3><table><tr><th></th><th>Spell</th><th>Time</th><th>Range</th>\
                      <th>Duration</th><th>Components</th><th>Effect</th></tr>");
        for spell in &group.spells {
            let marker = match (spell.favorite, spell.prepared) {
                (true, _) => "&#9733;",
                (false, true) => "&#9679;",
                (false, false) => "",
            };
            let _ = write!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                marker, spell.name, spell.time, spell.range, spell.duration,
                spell.components, spell.effect
            );
        }
        out.push_str("</table>");
    }
    out.push_str("</section>");
}

fn npc_body(out: &mut String, vm: &NpcVm) {
    let _ = write!(
        out,
        "<div class=\"sheet-header\"><h1>{}</h1>\
         <div class=\"subtitle\">{} \u{b7} {}</div></div>",
        vm.name, vm.type_line, vm.challenge_line
    );
    abilities_row(out, &vm.abilities);
    combat_row(out, &vm.combat);
    if let Some(saves) = &vm.saves_line {
        let _ = write!(out, "<div class=\"trait-line\"><b>Saving Throws</b> {}</div>", saves);
    }
    if let Some(skills) = &vm.skills_line {
        let _ = write!(out, "<div class=\"trait-line\"><b>Skills</b> {}</div>", skills);
    }
    if let Some(traits) = &vm.traits {
        for line in traits {
            let _ = write!(
                out,
                "<div class=\"trait-line\"><b>{}</b> {}</div>",
                line.label, line.entries
            );
        }
    }
    if let Some(features) = &vm.features {
        entry_section(out, "Features", features);
    }
    if let Some(actions) = &vm.actions {
        entry_section(out, "Actions", actions);
    }
    if let Some(reactions) = &vm.reactions {
        entry_section(out, "Reactions", reactions);
    }
    if let Some(spellcasting) = &vm.spellcasting {
        spellcasting_section(out, spellcasting);
    }
}

// =============================================================================
// Templates
// =============================================================================

struct CharacterTemplate;

impl Template for CharacterTemplate {
    fn render(&self, vm: &ViewModel) -> Result<String, RenderError> {
        let ViewModel::Character(vm) = vm else {
            return Err(RenderError::ShapeMismatch {
                template: "character",
            });
        };
        let mut out = String::from("<div class=\"sheet\">");
        if let Some(portrait) = &vm.portrait {
            let _ = write!(out, "<img class=\"portrait\" src=\"{}\" alt=\"\">", portrait);
        }
        let _ = write!(
            out,
            "<div class=\"sheet-header\"><h1>{}</h1>\
             <div class=\"subtitle\">{}</div><div class=\"subtitle\">{}</div></div>",
            vm.name, vm.class_line, vm.identity_line
        );
        abilities_row(&mut out, &vm.abilities);
        combat_row(&mut out, &vm.combat);
        if let Some(skills) = &vm.skills {
            out.push_str(
                "<section><h2>Skills</h2><table>\
                 <tr><th></th><th>Skill</th><th>Bonus</th><th>Passive</th></tr>",
            );
            for skill in skills {
                let _ = write!(
                    out,
                    "<tr><td><span class=\"skill-glyph\">{}</span></td>\
                     <td>{}</td><td>{}</td><td>{}</td></tr>",
                    skill.glyph, skill.label, skill.total, skill.passive
                );
            }
            out.push_str("</table></section>");
        }
        if let Some(traits) = &vm.traits {
            out.push_str("<section><h2>Traits</h2>");
            for line in traits {
                let _ = write!(
                    out,
                    "<div class=\"trait-line\"><b>{}</b> {}</div>",
                    line.label, line.entries
                );
            }
            out.push_str("</section>");
        }
        if let Some(attacks) = &vm.attacks {
            out.push_str(
                "<section><h2>Attacks</h2><table>\
                 <tr><th>Attack</th><th>To Hit</th><th>Range</th><th>Damage</th><th>Save</th></tr>",
            );
            for attack in attacks {
                let _ = write!(
                    out,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    attack.name,
                    attack.to_hit,
                    attack.range,
                    attack.damage,
                    attack.save.as_deref().unwrap_or("")
                );
            }
            out.push_str("</table></section>");
        }
        action_sections(&mut out, &vm.actions);
        if let Some(spellcasting) = &vm.spellcasting {
            spellcasting_section(&mut out, spellcasting);
        }
        if let Some(features) = &vm.features {
            for section in features {
                entry_section(&mut out, &section.heading, &section.entries);
            }
        }
        if let Some(inventory) = &vm.inventory {
            out.push_str(
                "<section><h2>Inventory</h2><table>\
                 <tr><th>Item</th><th>Type</th><th>Qty</th><th>Weight</th><th>Uses</th></tr>",
            );
            for item in inventory {
                item_row(&mut out, item, false);
                for nested in &item.contents {
                    item_row(&mut out, nested, true);
                }
            }
            out.push_str("</table></section>");
        }
        out.push_str("</div>");
        Ok(out)
    }
}

fn item_row(out: &mut String, item: &crate::use_cases::view_model::ItemVm, nested: bool) {
    let name = if nested {
        format!("&nbsp;&nbsp;&#8627; {}", item.name)
    } else if item.equipped {
        format!("{} &#9670;", item.name)
    } else {
        item.name.clone()
    };
    let _ = write!(
        out,
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        name,
        item.kind,
        item.quantity,
        item.weight,
        item.uses.as_deref().unwrap_or("")
    );
}

struct NpcTemplate;

impl Template for NpcTemplate {
    fn render(&self, vm: &ViewModel) -> Result<String, RenderError> {
        let ViewModel::Npc(vm) = vm else {
            return Err(RenderError::ShapeMismatch { template: "npc" });
        };
        let mut out = String::from("<div class=\"sheet\">");
        npc_body(&mut out, vm);
        out.push_str("</div>");
        Ok(out)
    }
}

struct EncounterTemplate;

impl Template for EncounterTemplate {
    fn render(&self, vm: &ViewModel) -> Result<String, RenderError> {
        let ViewModel::Encounter(vm) = vm else {
            return Err(RenderError::ShapeMismatch {
                template: "encounter",
            });
        };
        let mut out = String::from("<div class=\"sheet\">");
        let _ = write!(
            out,
            "<div class=\"sheet-header\"><h1>{}</h1>\
             <div class=\"subtitle\">{}</div></div>",
            vm.name, vm.summary_line
        );
        for member in &vm.members {
            out.push_str("<div class=\"member\">");
            npc_body(&mut out, member);
            out.push_str("</div>");
        }
        out.push_str("</div>");
        Ok(out)
    }
}

struct PartyTemplate;

impl Template for PartyTemplate {
    fn render(&self, vm: &ViewModel) -> Result<String, RenderError> {
        let ViewModel::Party(vm) = vm else {
            return Err(RenderError::ShapeMismatch { template: "party" });
        };
        let mut out = String::from("<div class=\"sheet\">");
        let _ = write!(
            out,
            "<div class=\"sheet-header\"><h1>{}</h1></div>",
            vm.name
        );
        for member in &vm.members {
            let _ = write!(
                out,
                "<div class=\"party-member\"><h3>{} \u{2014} {}</h3>\
                 <div class=\"combat-line\">\
                 <span class=\"stat\"><b>AC</b> {}</span>\
                 <span class=\"stat\"><b>HP</b> {}</span>",
                member.name, member.class_line, member.armor_class, member.hit_points
            );
            if !member.senses.is_empty() {
                let _ = write!(
                    out,
                    "<span class=\"stat\"><b>Senses</b> {}</span>",
                    member.senses
                );
            }
            out.push_str("</div>");
            for passive in &member.passives {
                let _ = write!(
                    out,
                    "<span class=\"stat\"><b>{}</b> {}&nbsp; </span>",
                    passive.label, passive.value
                );
            }
            let _ = write!(
                out,
                "<div class=\"trait-line\"><b>Saves</b> {}</div>",
                member.saves_line
            );
            if !member.skills_line.is_empty() {
                let _ = write!(
                    out,
                    "<div class=\"trait-line\"><b>Skills</b> {}</div>",
                    member.skills_line
                );
            }
            if let Some(slots) = &member.slots_line {
                let _ = write!(
                    out,
                    "<div class=\"trait-line\"><b>Spell Slots</b> {}</div>",
                    slots
                );
            }
            out.push_str("</div>");
        }
        out.push_str("</div>");
        Ok(out)
    }
}

// =============================================================================
// Tests
// =============================================================================
