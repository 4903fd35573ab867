use crate::activity::Activity;

/// カリキュラム進行の結果
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// 次のバリエーションへ
    Next {
        index: usize,
        instruction: &'static str,
    },
    /// 最終バリエーションを完了した
    Complete,
}

/// 現在のバリエーションを達成した後の次状態を返す
///
/// 1種目はちょうど3バリエーション。3つ目の達成はDoneへの遷移で
/// あって4つ目には進まない。
pub fn advance(activity: &Activity, current_index: usize) -> Advance {
    let next = current_index + 1;
    if next < activity.poses.len() {
        Advance::Next {
            index: next,
            instruction: activity.poses[next].text,
        }
    } else {
        Advance::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityCatalog, BalanceType};

    #[test]
    fn test_advance_through_all_variants() {
        let catalog = ActivityCatalog::builtin();
        let activity = catalog.get(BalanceType::OnePoint).unwrap();

        match advance(activity, 0) {
            Advance::Next { index, instruction } => {
                assert_eq!(index, 1);
                assert_eq!(instruction, activity.poses[1].text);
            }
            Advance::Complete => panic!("should not complete after first variant"),
        }

        match advance(activity, 1) {
            Advance::Next { index, .. } => assert_eq!(index, 2),
            Advance::Complete => panic!("should not complete after second variant"),
        }

        assert_eq!(advance(activity, 2), Advance::Complete);
    }

    #[test]
    fn test_every_activity_completes_after_third() {
        let catalog = ActivityCatalog::builtin();
        for activity in catalog.all() {
            assert_eq!(advance(activity, 2), Advance::Complete);
        }
    }
}
