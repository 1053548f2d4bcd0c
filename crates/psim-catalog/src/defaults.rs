//! Built-in catalog and context data, used when no collaborator supplies
//! its own tables.

use std::io::Cursor;

use psim_core::LifePattern;

use crate::{ActivityCatalog, CatalogResult, ContextTable, SlotContext, load_activities_reader};

/// The default "attention economy" activity set.
pub const DEFAULT_ACTIVITIES_CSV: &str = "\
ID,Name,Category,Media_Group,Intensity,Fun_Reward,Growth_Reward,Difficulty,Cost,Stress_Cost,Tags,Ad_Supported\n\
ACT_GM_PVP,PvP ranked match,GAME,GAME,90,50,5,60,0,15,Competition|Skill,false\n\
ACT_GM_AUTO,Idle auto-hunt,GAME,GAME,15,5,3,0,0,0,Growth|RPG,false\n\
ACT_GM_GACHA,Gacha pull,GAME,GAME,40,80,0,0,3000,-5,Gambling|Collection,false\n\
ACT_GM_AD,Rewarded ad,GAME,GAME,30,2,0,0,0,5,Free|Patience,true\n\
ACT_MD_SHORT,Short-form video,MEDIA,VIDEO,60,25,0,0,0,5,Humor|Trend,false\n\
ACT_BK_READ,Reading,BOOK,BOOK,50,8,15,40,0,-5,Info|Growth,false\n\
ACT_CM_BOARD,Community board,COMM,COMM,40,10,2,0,0,10,Social|Info,false\n\
ACT_CM_CHAT,Group chat,COMM,COMM,20,15,0,0,0,3,Social|Humor,false\n\
ACT_LF_WORK,Focused work,WORK,WORK,85,0,30,50,-200,20,Responsibility|Skill,false\n\
ACT_LF_STUDY,Exam study,WORK,BOOK,70,0,35,55,0,18,Growth|Info|Responsibility,false\n\
ACT_LF_REST,Rest,LIFE,LIFE,5,1,0,0,0,-20,Relax,false\n\
";

/// Parse [`DEFAULT_ACTIVITIES_CSV`].
pub fn default_catalog() -> CatalogResult<ActivityCatalog> {
    load_activities_reader(Cursor::new(DEFAULT_ACTIVITIES_CSV))
}

/// `(start_hour, end_hour, label, stress_mod, ad_eff)`, covering 0..24.
type Span = (u32, u32, &'static str, f64, f64);

const OFFICE_WORKER: &[Span] = &[
    (0, 7, "SLEEP", 0.5, 0.1),
    (7, 9, "COMMUTE_AM", 1.5, 1.5),
    (9, 12, "WORK_AM", 1.2, 0.5),
    (12, 13, "LUNCH", 0.8, 1.2),
    (13, 18, "WORK_PM", 1.3, 0.5),
    (18, 20, "COMMUTE_PM", 1.4, 1.4),
    (20, 24, "RELAX", 0.9, 1.1),
];

const STUDENT: &[Span] = &[
    (0, 7, "SLEEP", 0.5, 0.1),
    (7, 9, "COMMUTE_AM", 1.3, 1.4),
    (9, 12, "CLASS_AM", 1.1, 0.6),
    (12, 13, "LUNCH", 0.8, 1.3),
    (13, 17, "CLASS_PM", 1.2, 0.6),
    (17, 19, "FREE", 0.9, 1.3),
    (19, 23, "STUDY", 1.3, 0.8),
    (23, 24, "RELAX", 0.9, 1.2),
];

const FREELANCER: &[Span] = &[
    (0, 2, "LATE_WORK", 1.1, 0.9),
    (2, 9, "SLEEP", 0.5, 0.1),
    (9, 11, "RELAX", 0.8, 1.1),
    (11, 18, "WORK", 1.2, 0.7),
    (18, 20, "RELAX", 0.9, 1.2),
    (20, 24, "LATE_WORK", 1.1, 0.9),
];

const NIGHT_SHIFT: &[Span] = &[
    (0, 6, "WORK_NIGHT", 1.4, 0.5),
    (6, 8, "COMMUTE_AM", 1.3, 1.3),
    (8, 15, "SLEEP", 0.5, 0.1),
    (15, 18, "RELAX", 0.9, 1.2),
    (18, 20, "ERRANDS", 1.0, 1.0),
    (20, 22, "COMMUTE_PM", 1.3, 1.3),
    (22, 24, "WORK_NIGHT", 1.4, 0.5),
];

fn spans(pattern: LifePattern) -> &'static [Span] {
    match pattern {
        LifePattern::OfficeWorker => OFFICE_WORKER,
        LifePattern::Student      => STUDENT,
        LifePattern::Freelancer   => FREELANCER,
        LifePattern::NightShift   => NIGHT_SHIFT,
    }
}

/// The four built-in life-pattern day schedules.
pub fn default_context() -> ContextTable {
    ContextTable::from_fn(|slot, pattern| {
        let hour = (slot / 4) as u32;
        spans(pattern)
            .iter()
            .find(|(start, end, ..)| (*start..*end).contains(&hour))
            .map_or_else(SlotContext::neutral, |&(_, _, label, stress_mod, ad_eff)| SlotContext {
                label: label.to_string(),
                stress_mod,
                ad_eff,
            })
    })
}
