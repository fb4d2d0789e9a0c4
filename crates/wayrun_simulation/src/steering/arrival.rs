//! Arrival detector: one-shot переход "в пути" → "прибыл".

/// Результат проверки прибытия за тик
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrivalCheck {
    /// Не на финальном сегменте или вне допуска
    #[default]
    Travelling,
    /// Переход false → true на этом тике (нотификация отправляется ОДИН раз)
    JustArrived,
    /// Уже прибыли ранее, стоим в допуске
    AlreadyArrived,
}

impl ArrivalCheck {
    pub fn just_arrived(&self) -> bool {
        matches!(self, ArrivalCheck::JustArrived)
    }

    /// Агент в допуске конечной точки (velocity должна быть нулевой)
    pub fn is_at_target(&self) -> bool {
        !matches!(self, ArrivalCheck::Travelling)
    }
}

/// Флаг прибытия для текущего экземпляра пути
///
/// Сбрасывается только при замене пути или disable агента.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrivalDetector {
    reached: bool,
}

impl ArrivalDetector {
    pub fn evaluate(
        &mut self,
        on_final_segment: bool,
        target_dist: f32,
        end_reached_distance: f32,
    ) -> ArrivalCheck {
        if !on_final_segment || target_dist > end_reached_distance {
            return ArrivalCheck::Travelling;
        }

        if self.reached {
            ArrivalCheck::AlreadyArrived
        } else {
            self.reached = true;
            ArrivalCheck::JustArrived
        }
    }

    pub fn is_reached(&self) -> bool {
        self.reached
    }

    pub fn reset(&mut self) {
        self.reached = false;
    }
}
