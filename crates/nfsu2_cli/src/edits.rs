use nfsu2_core::{CoreResult, PerformanceMode, SaveRecord};

/// Edits gathered from flags or prompts, applied to the record in one pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditPlan {
    pub money: Option<i32>,
    pub cars: Vec<(usize, PerformanceMode)>,
}

impl EditPlan {
    pub fn is_empty(&self) -> bool {
        self.money.is_none() && self.cars.is_empty()
    }

    /// Returns the slots that were skipped because no car is stored there.
    pub fn apply(&self, record: &mut SaveRecord) -> CoreResult<Vec<usize>> {
        if let Some(money) = self.money {
            record.set_money(money)?;
        }

        let mut skipped = Vec::new();
        for &(slot, mode) in &self.cars {
            if !record.is_slot_used(slot)? {
                log::warn!("car slot {slot} is empty, not changing performance");
                skipped.push(slot);
                continue;
            }
            record.change_car_performance(slot, mode)?;
        }
        Ok(skipped)
    }
}

/// Only positive amounts replace the stored money; `-1`, zero and other
/// negative values mean "leave unchanged".
pub fn money_edit(requested: i64) -> Option<i32> {
    if requested <= 0 {
        return None;
    }
    i32::try_from(requested).ok()
}

#[cfg(test)]
mod tests {
    use super::money_edit;

    #[test]
    fn money_policy_keeps_only_positive_values() {
        assert_eq!(money_edit(-1), None);
        assert_eq!(money_edit(0), None);
        assert_eq!(money_edit(-5000), None);
        assert_eq!(money_edit(1), Some(1));
        assert_eq!(money_edit(5000), Some(5000));
        assert_eq!(money_edit(i32::MAX as i64), Some(i32::MAX));
        assert_eq!(money_edit(i32::MAX as i64 + 1), None);
    }
}
